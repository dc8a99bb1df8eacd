use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use vitahealth::config::PortalConfig;
use vitahealth::directory::views;
use vitahealth::error::AppError;
use vitahealth::identity::{menu_for, Role, SessionManager, SessionState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("building log filter")?;
    fmt().with_env_filter(filter).init();

    let cfg = PortalConfig::from_env();
    info!(
        target: "vitahealth",
        "Vita Health Link starting: session_dir={:?}, auth_latency_ms={}, seed_file={:?}",
        cfg.session_dir, cfg.auth_latency.as_millis(), cfg.seed_file
    );

    let store = cfg.open_store().context("opening session store")?;
    let directory = cfg.open_directory().context("loading seed tables")?;
    let sessions = SessionManager::with_seed_users(store, cfg.auth_latency);

    let identity = match sessions.resolve() {
        SessionState::Authenticated(id) => id,
        _ => {
            let email = std::env::var("VITA_DEMO_EMAIL").unwrap_or_else(|_| "patient@example.com".to_string());
            let password = std::env::var("VITA_DEMO_PASSWORD").unwrap_or_else(|_| "password123".to_string());
            let role: Role = std::env::var("VITA_DEMO_ROLE")
                .unwrap_or_else(|_| "patient".to_string())
                .parse()
                .map_err(anyhow::Error::msg)?;
            match sessions.login(&email, &password, role).await {
                Ok(id) => id,
                Err(e) => {
                    let toast: AppError = e.into();
                    warn!(target: "vitahealth", "{}: {}", toast.title(), toast.message());
                    return Ok(());
                }
            }
        }
    };

    let summary = views::dashboard(&directory, &identity);
    info!(target: "vitahealth", "{}", summary.greeting);
    info!(target: "vitahealth", "upcoming appointments: {} ({})", summary.upcoming_count, summary.upcoming_caption());
    info!(target: "vitahealth", "{} ({})", serde_json::to_string(&summary.card)?, summary.card_caption());
    for item in menu_for(identity.role) {
        info!(target: "vitahealth", "menu: {} -> {}", item.title, item.route.path());
    }
    Ok(())
}

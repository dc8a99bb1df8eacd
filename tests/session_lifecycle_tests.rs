//! Session lifecycle integration tests: login/register/logout against a file-backed store,
//! checked by reopening the store with a fresh manager as a process restart would.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tempfile::tempdir;

use vitahealth::error::SessionError;
use vitahealth::identity::{check_route, RegisterRequest, Role, Route, RouteAccess, SessionManager, SessionState, SESSION_KEY};
use vitahealth::storage::{FileStore, MemoryStore, SessionStore};

fn fresh_manager(dir: &std::path::Path) -> Result<SessionManager> {
    let store = FileStore::open(dir)?;
    Ok(SessionManager::with_seed_users(Arc::new(store), Duration::ZERO))
}

#[tokio::test]
async fn login_survives_restart() -> Result<()> {
    let tmp = tempdir()?;
    let first = fresh_manager(tmp.path())?;
    assert_eq!(first.resolve(), SessionState::Anonymous);
    let id = first.login("patient@example.com", "password123", Role::Patient).await?;
    assert_eq!(id.id, "p1");
    assert_eq!(id.name, "John Doe");
    assert_eq!(id.role, Role::Patient);

    let second = fresh_manager(tmp.path())?;
    assert_eq!(second.resolve(), SessionState::Authenticated(id));
    Ok(())
}

#[tokio::test]
async fn every_seed_account_logs_in_with_its_own_role() -> Result<()> {
    let cases = [
        ("patient@example.com", Role::Patient, "p1"),
        ("doctor@example.com", Role::Doctor, "d1"),
    ];
    for (email, role, expected) in cases {
        let tmp = tempdir()?;
        let sm = fresh_manager(tmp.path())?;
        let id = sm.login(email, "password123", role).await?;
        assert_eq!(id.role, role);
        assert_eq!(id.id, expected);
        let raw = FileStore::open(tmp.path())?.get(SESSION_KEY)?.expect("persisted");
        assert!(!raw.contains("password"));
    }
    Ok(())
}

#[tokio::test]
async fn bad_triples_are_rejected_without_writes() -> Result<()> {
    let tmp = tempdir()?;
    let sm = fresh_manager(tmp.path())?;
    sm.resolve();
    let bad = [
        ("patient@example.com", "password123", Role::Doctor),
        ("patient@example.com", "Password123", Role::Patient),
        ("Patient@example.com", "password123", Role::Patient),
        ("", "", Role::Patient),
    ];
    for (email, pw, role) in bad {
        let err = sm.login(email, pw, role).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials), "{} {:?}", email, role);
    }
    assert_eq!(FileStore::open(tmp.path())?.get(SESSION_KEY)?, None);
    assert!(!tmp.path().join("store.json").exists());
    assert_eq!(sm.state(), SessionState::Anonymous);
    Ok(())
}

#[tokio::test]
async fn register_survives_restart_and_keeps_role_prefix() -> Result<()> {
    let tmp = tempdir()?;
    let sm = fresh_manager(tmp.path())?;
    let id = sm.register(RegisterRequest::new("Jane Roe", "jane@example.com", "s3cret", Role::Patient)).await?;
    assert!(id.id.starts_with('p'));
    assert_eq!(id.email, "jane@example.com");

    let reopened = fresh_manager(tmp.path())?;
    assert_eq!(reopened.resolve().identity(), Some(&id));
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected_without_writes() -> Result<()> {
    let tmp = tempdir()?;
    let sm = fresh_manager(tmp.path())?;
    for email in ["patient@example.com", "doctor@example.com"] {
        let err = sm.register(RegisterRequest::new("Dup", email, "pw", Role::Doctor)).await.unwrap_err();
        assert!(matches!(err, SessionError::DuplicateEmail));
    }
    assert!(!tmp.path().join("store.json").exists());
    Ok(())
}

#[tokio::test]
async fn duplicate_check_is_case_sensitive() -> Result<()> {
    let sm = SessionManager::with_seed_users(Arc::new(MemoryStore::new()), Duration::ZERO);
    // exact match only: a differently-cased address is a new account
    let id = sm.register(RegisterRequest::new("Shadow", "PATIENT@example.com", "pw", Role::Patient)).await?;
    assert_eq!(id.id, "p3");
    Ok(())
}

#[tokio::test]
async fn repeated_registrations_never_reuse_ids() -> Result<()> {
    let sm = SessionManager::with_seed_users(Arc::new(MemoryStore::new()), Duration::ZERO);
    let mut ids = Vec::new();
    for i in 0..5 {
        let role = if i % 2 == 0 { Role::Patient } else { Role::Doctor };
        let id = sm.register(RegisterRequest::new(format!("User {}", i), format!("u{}@example.com", i), "pw".to_string(), role)).await?;
        assert_eq!(id.id.chars().next(), Some(role.id_prefix()));
        ids.push(id.id);
    }
    let mut dedup = ids.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), ids.len());
    Ok(())
}

#[tokio::test]
async fn logout_survives_restart() -> Result<()> {
    let tmp = tempdir()?;
    let sm = fresh_manager(tmp.path())?;
    sm.login("doctor@example.com", "password123", Role::Doctor).await?;
    sm.logout();
    assert_eq!(sm.state(), SessionState::Anonymous);

    let reopened = fresh_manager(tmp.path())?;
    assert_eq!(reopened.resolve(), SessionState::Anonymous);
    Ok(())
}

#[tokio::test]
async fn second_login_overwrites_the_single_entry() -> Result<()> {
    let store = MemoryStore::new();
    let sm = SessionManager::with_seed_users(Arc::new(store.clone()), Duration::ZERO);
    sm.login("patient@example.com", "password123", Role::Patient).await?;
    let d = sm.login("doctor@example.com", "password123", Role::Doctor).await?;
    assert_eq!(store.keys(), vec![SESSION_KEY.to_string()]);
    let fresh = SessionManager::with_seed_users(Arc::new(store), Duration::ZERO);
    assert_eq!(fresh.resolve().identity(), Some(&d));
    Ok(())
}

#[tokio::test]
async fn route_guard_follows_session() -> Result<()> {
    let sm = SessionManager::with_seed_users(Arc::new(MemoryStore::new()), Duration::ZERO);
    assert_eq!(check_route(&sm.state(), &Route::Dashboard), RouteAccess::Pending);
    sm.resolve();
    assert_eq!(check_route(&sm.state(), &Route::Dashboard), RouteAccess::RedirectToLogin);
    let id = sm.login("doctor@example.com", "password123", Role::Doctor).await?;
    assert_eq!(check_route(&sm.state(), &Route::DoctorSchedule), RouteAccess::Allowed(id));
    assert_eq!(check_route(&sm.state(), &Route::PatientReports), RouteAccess::Forbidden);
    sm.logout();
    assert_eq!(check_route(&sm.state(), &Route::DoctorSchedule), RouteAccess::RedirectToLogin);
    Ok(())
}

#[tokio::test]
async fn configured_latency_is_awaited() -> Result<()> {
    let sm = SessionManager::with_seed_users(Arc::new(MemoryStore::new()), Duration::from_millis(40));
    let started = std::time::Instant::now();
    let err = sm.login("nobody@example.com", "x", Role::Patient).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidCredentials));
    assert!(started.elapsed() >= Duration::from_millis(40));
    Ok(())
}

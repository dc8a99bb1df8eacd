//! Identity and session management for the portal: who is logged in, how that survives
//! a restart, and which views the current role may open.
//! Keep the public surface thin and split implementation across sub-modules.

mod principal;
mod credentials;
mod session;
mod provider;
mod authorizer;

pub use principal::{Identity, Role};
pub use credentials::{CredentialRecord, CredentialTable};
pub use session::{SessionManager, SessionState, SESSION_KEY};
pub use provider::{AuthProvider, LocalAuthProvider, LoginRequest, RegisterRequest};
pub use authorizer::{Route, RouteAccess, MenuItem, check_route, menu_for};

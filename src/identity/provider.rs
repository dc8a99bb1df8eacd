// Keep provider request structs plain Rust; only Identity crosses into storage.
use parking_lot::RwLock;
use tracing::info;

use super::credentials::{CredentialRecord, CredentialTable};
use super::principal::{Identity, Role};
use crate::error::SessionError;

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self { email: email.into(), password: password.into(), role }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegisterRequest {
    /// Request whose confirmation equals the password.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        let password = password.into();
        Self { name: name.into(), email: email.into(), confirm_password: password.clone(), password, role }
    }

    pub fn with_confirmation(mut self, confirm: impl Into<String>) -> Self {
        self.confirm_password = confirm.into();
        self
    }

    /// Form-level checks done before anything is sent to the provider.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(SessionError::Validation("Name, email and password are required".into()));
        }
        if self.password != self.confirm_password {
            return Err(SessionError::Validation("Passwords do not match".into()));
        }
        Ok(())
    }
}

pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, req: &LoginRequest) -> Result<Identity, SessionError>;
    fn enroll(&self, req: &RegisterRequest) -> Result<Identity, SessionError>;
    /// Undo an enrollment whose session could not be stored.
    fn withdraw(&self, id: &str);
}

/// Provider over an in-process credential table. Enrolled accounts live as long as the
/// provider does and are never written anywhere.
pub struct LocalAuthProvider {
    table: RwLock<CredentialTable>,
}

impl LocalAuthProvider {
    pub fn new(table: CredentialTable) -> Self { Self { table: RwLock::new(table) } }

    pub fn seeded() -> Self { Self::new(CredentialTable::seed()) }

    pub fn account_count(&self) -> usize { self.table.read().len() }
}

impl Default for LocalAuthProvider {
    fn default() -> Self { Self::seeded() }
}

impl AuthProvider for LocalAuthProvider {
    fn authenticate(&self, req: &LoginRequest) -> Result<Identity, SessionError> {
        let table = self.table.read();
        let rec = table.find_match(&req.email, &req.password, req.role).ok_or(SessionError::InvalidCredentials)?;
        Ok(rec.identity())
    }

    fn enroll(&self, req: &RegisterRequest) -> Result<Identity, SessionError> {
        // Check and insert under one write guard so two enrollments cannot share an id.
        let mut table = self.table.write();
        if table.email_taken(&req.email) {
            return Err(SessionError::DuplicateEmail);
        }
        let id = table.next_id(req.role);
        let rec = CredentialRecord {
            id,
            name: req.name.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            role: req.role,
        };
        let identity = rec.identity();
        table.push(rec);
        info!(target: "vitahealth::session", "auth.enroll id={} role={}", identity.id, identity.role);
        Ok(identity)
    }

    fn withdraw(&self, id: &str) {
        if self.table.write().remove_id(id) {
            info!(target: "vitahealth::session", "auth.withdraw id={}", id);
        }
    }
}

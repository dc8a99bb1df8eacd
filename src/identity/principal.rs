use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }

    /// Leading letter used in generated ids (`p3`, `d4`).
    pub fn id_prefix(&self) -> char {
        match self {
            Role::Patient => 'p',
            Role::Doctor => 'd',
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(format!("unknown role '{}': expected patient or doctor", other)),
        }
    }
}

/// The authenticated user as held for the session. This is exactly what gets persisted,
/// so it must never grow a password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_patient(&self) -> bool { self.role == Role::Patient }
    pub fn is_doctor(&self) -> bool { self.role == Role::Doctor }

    /// Doctors are addressed as "Dr." unless the stored name already carries the title.
    pub fn greeting(&self) -> String {
        match self.role {
            Role::Doctor if self.name.starts_with("Dr. ") => format!("Hello, {}", self.name),
            Role::Doctor => format!("Hello, Dr. {}", self.name),
            Role::Patient => format!("Hello, {}", self.name),
        }
    }
}

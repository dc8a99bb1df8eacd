use serde::{Deserialize, Serialize};

use super::principal::{Identity, Role};

/// A login record. Only ever used for matching; callers receive an `Identity` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl CredentialRecord {
    pub fn identity(&self) -> Identity {
        Identity { id: self.id.clone(), name: self.name.clone(), email: self.email.clone(), role: self.role }
    }
}

/// Lookup table for login matching and duplicate-email checks.
/// Email comparison is exact (case-sensitive) in both directions.
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    records: Vec<CredentialRecord>,
}

impl CredentialTable {
    pub fn new(records: Vec<CredentialRecord>) -> Self { Self { records } }

    /// The two demo accounts the portal ships with.
    pub fn seed() -> Self {
        Self::new(vec![
            CredentialRecord {
                id: "p1".into(),
                name: "John Doe".into(),
                email: "patient@example.com".into(),
                password: "password123".into(),
                role: Role::Patient,
            },
            CredentialRecord {
                id: "d1".into(),
                name: "Dr. Sarah Smith".into(),
                email: "doctor@example.com".into(),
                password: "password123".into(),
                role: Role::Doctor,
            },
        ])
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn find_match(&self, email: &str, password: &str, role: Role) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.email == email && r.password == password && r.role == role)
    }

    pub fn email_taken(&self, email: &str) -> bool { self.records.iter().any(|r| r.email == email) }

    pub fn contains_id(&self, id: &str) -> bool { self.records.iter().any(|r| r.id == id) }

    /// Next free id of the form `{role letter}{n}`, starting from `len + 1` and skipping
    /// anything already taken.
    pub fn next_id(&self, role: Role) -> String {
        let mut n = self.records.len() + 1;
        loop {
            let candidate = format!("{}{}", role.id_prefix(), n);
            if !self.contains_id(&candidate) { return candidate; }
            n += 1;
        }
    }

    pub fn push(&mut self, record: CredentialRecord) { self.records.push(record); }

    /// Drop the record with this id. Returns true if one was removed.
    pub fn remove_id(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_requires_all_three_fields() {
        let t = CredentialTable::seed();
        assert_eq!(t.find_match("patient@example.com", "password123", Role::Patient).map(|r| r.id.as_str()), Some("p1"));
        assert!(t.find_match("patient@example.com", "password123", Role::Doctor).is_none());
        assert!(t.find_match("patient@example.com", "wrong", Role::Patient).is_none());
        assert!(t.find_match("nobody@example.com", "password123", Role::Patient).is_none());
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let t = CredentialTable::seed();
        assert!(t.email_taken("doctor@example.com"));
        assert!(!t.email_taken("Doctor@Example.com"));
        assert!(t.find_match("PATIENT@example.com", "password123", Role::Patient).is_none());
    }

    #[test]
    fn next_id_skips_taken_ids() {
        let mut t = CredentialTable::seed();
        assert_eq!(t.next_id(Role::Patient), "p3");
        t.push(CredentialRecord { id: "p3".into(), name: "A".into(), email: "a@x".into(), password: "x".into(), role: Role::Patient });
        assert_eq!(t.next_id(Role::Patient), "p4");
        assert_eq!(t.next_id(Role::Doctor), "d4");
        t.push(CredentialRecord { id: "d5".into(), name: "B".into(), email: "b@x".into(), password: "x".into(), role: Role::Doctor });
        // len + 1 == 5 is taken for doctors
        assert_eq!(t.next_id(Role::Doctor), "d6");
    }

    #[test]
    fn identity_strips_password() {
        let t = CredentialTable::seed();
        let id = t.find_match("doctor@example.com", "password123", Role::Doctor).unwrap().identity();
        assert_eq!(id, Identity { id: "d1".into(), name: "Dr. Sarah Smith".into(), email: "doctor@example.com".into(), role: Role::Doctor });
    }
}

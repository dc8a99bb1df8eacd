//! Derived, presentation-ready views built from `Directory` query results.
//! Nothing here touches the tables directly.

use std::collections::BTreeMap;

use serde::Serialize;

use super::models::{Appointment, MedicalReport, Patient, ReportType, TimeSlot};
use super::Directory;
use crate::identity::{Identity, Role};

/// Role-specific second card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardCard {
    /// `last_report` is the title of the patient's first listed report.
    MedicalReports { count: usize, last_report: Option<String> },
    MyPatients { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub greeting: String,
    pub upcoming_count: usize,
    /// Earliest scheduled appointment by date.
    pub next_appointment: Option<Appointment>,
    pub card: DashboardCard,
}

impl DashboardSummary {
    /// One-line caption under the upcoming count.
    pub fn upcoming_caption(&self) -> String {
        match &self.next_appointment {
            Some(a) => format!("Next: {} at {}", a.date, a.time),
            None => "No upcoming appointments".to_string(),
        }
    }

    /// Caption under the role-specific card.
    pub fn card_caption(&self) -> String {
        match &self.card {
            DashboardCard::MedicalReports { last_report: Some(title), .. } => format!("Last report: {}", title),
            DashboardCard::MedicalReports { last_report: None, .. } => "No medical reports available".to_string(),
            DashboardCard::MyPatients { .. } => "Total patients under your care".to_string(),
        }
    }
}

pub fn dashboard(dir: &dyn Directory, identity: &Identity) -> DashboardSummary {
    let (appointments, card) = match identity.role {
        Role::Patient => {
            let reports = dir.reports_for_patient(&identity.id);
            let card = DashboardCard::MedicalReports {
                count: reports.len(),
                last_report: reports.into_iter().next().map(|r| r.title),
            };
            (dir.appointments_for_patient(&identity.id), card)
        }
        Role::Doctor => (
            dir.appointments_for_doctor(&identity.id),
            DashboardCard::MyPatients { count: dir.patients_of_doctor(&identity.id).len() },
        ),
    };
    let (mut upcoming, _) = split_appointments(appointments);
    upcoming.sort_by(|a, b| a.date.cmp(&b.date));
    DashboardSummary {
        greeting: identity.greeting(),
        upcoming_count: upcoming.len(),
        next_appointment: upcoming.into_iter().next(),
        card,
    }
}

/// (upcoming, past): scheduled appointments versus everything else.
pub fn split_appointments(appointments: Vec<Appointment>) -> (Vec<Appointment>, Vec<Appointment>) {
    appointments.into_iter().partition(|a| a.is_upcoming())
}

pub fn appointments_by_date(appointments: Vec<Appointment>) -> BTreeMap<String, Vec<Appointment>> {
    let mut out: BTreeMap<String, Vec<Appointment>> = BTreeMap::new();
    for a in appointments {
        out.entry(a.date.clone()).or_default().push(a);
    }
    out
}

pub fn open_slots(slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.into_iter().filter(|s| !s.is_booked).collect()
}

fn matches_term(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Case-insensitive match on title, type label or doctor name.
pub fn search_reports(reports: Vec<MedicalReport>, term: &str) -> Vec<MedicalReport> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() { return reports; }
    reports
        .into_iter()
        .filter(|r| {
            matches_term(&r.title, &needle) || matches_term(r.report_type.label(), &needle) || matches_term(&r.doctor_name, &needle)
        })
        .collect()
}

pub fn group_reports_by_type(reports: Vec<MedicalReport>) -> BTreeMap<ReportType, Vec<MedicalReport>> {
    let mut out: BTreeMap<ReportType, Vec<MedicalReport>> = BTreeMap::new();
    for r in reports {
        out.entry(r.report_type).or_default().push(r);
    }
    out
}

/// Case-insensitive match on name, email or any medical-history entry.
pub fn search_patients(patients: Vec<Patient>, term: &str) -> Vec<Patient> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() { return patients; }
    patients
        .into_iter()
        .filter(|p| {
            matches_term(&p.name, &needle)
                || matches_term(&p.email, &needle)
                || p.medical_history.iter().any(|h| matches_term(h, &needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SeedDirectory;

    fn john() -> Identity {
        Identity { id: "p1".into(), name: "John Doe".into(), email: "patient@example.com".into(), role: Role::Patient }
    }

    fn sarah() -> Identity {
        Identity { id: "d1".into(), name: "Dr. Sarah Smith".into(), email: "doctor@example.com".into(), role: Role::Doctor }
    }

    #[test]
    fn patient_dashboard() {
        let dir = SeedDirectory::builtin();
        let s = dashboard(&dir, &john());
        assert_eq!(s.greeting, "Hello, John Doe");
        assert_eq!(s.upcoming_count, 1);
        assert_eq!(s.next_appointment.as_ref().map(|a| a.id.as_str()), Some("app1"));
        assert_eq!(s.upcoming_caption(), "Next: 2025-04-15 at 10:00 AM");
        assert_eq!(s.card, DashboardCard::MedicalReports { count: 2, last_report: Some("Annual Physical Examination".into()) });
        assert_eq!(s.card_caption(), "Last report: Annual Physical Examination");
    }

    #[test]
    fn doctor_dashboard() {
        let dir = SeedDirectory::builtin();
        let s = dashboard(&dir, &sarah());
        assert_eq!(s.greeting, "Hello, Dr. Sarah Smith");
        assert_eq!(s.card, DashboardCard::MyPatients { count: 1 });
        assert_eq!(s.card_caption(), "Total patients under your care");
    }

    #[test]
    fn unknown_identity_gets_empty_dashboard() {
        let dir = SeedDirectory::builtin();
        let ghost = Identity { id: "p77".into(), name: "New".into(), email: "n@x".into(), role: Role::Patient };
        let s = dashboard(&dir, &ghost);
        assert_eq!(s.upcoming_count, 0);
        assert_eq!(s.upcoming_caption(), "No upcoming appointments");
        assert_eq!(s.card, DashboardCard::MedicalReports { count: 0, last_report: None });
        assert_eq!(s.card_caption(), "No medical reports available");
    }

    #[test]
    fn split_and_group_appointments() {
        let dir = SeedDirectory::builtin();
        let (up, past) = split_appointments(dir.appointments_for_patient("p1"));
        assert_eq!(up.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), vec!["app1"]);
        assert_eq!(past.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), vec!["app2"]);
        let by_date = appointments_by_date(dir.appointments_for_doctor("d1"));
        assert_eq!(by_date.keys().cloned().collect::<Vec<_>>(), vec!["2025-04-05".to_string(), "2025-04-15".to_string()]);
    }

    #[test]
    fn open_slots_drop_booked() {
        let dir = SeedDirectory::builtin();
        let open = open_slots(dir.availability_for_doctor("d1", Some("2025-04-15")));
        let starts: Vec<&str> = open.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["9:00 AM", "9:30 AM", "10:30 AM"]);
    }

    #[test]
    fn report_search_and_grouping() {
        let dir = SeedDirectory::builtin();
        let reports = dir.reports_for_patient("p1");
        assert_eq!(search_reports(reports.clone(), "").len(), 2);
        assert_eq!(search_reports(reports.clone(), "BLOOD")[0].id, "rep2");
        assert_eq!(search_reports(reports.clone(), "lab result")[0].id, "rep2");
        assert_eq!(search_reports(reports.clone(), "sarah").len(), 2);
        assert!(search_reports(reports.clone(), "radiology").is_empty());
        let grouped = group_reports_by_type(reports);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&ReportType::Consultation][0].id, "rep1");
    }

    #[test]
    fn patient_search_covers_history() {
        let dir = SeedDirectory::builtin();
        let pts = dir.patients_of_doctor("d1");
        assert_eq!(search_patients(pts.clone(), "asthma").len(), 1);
        assert_eq!(search_patients(pts.clone(), "PATIENT@").len(), 1);
        assert!(search_patients(pts, "diabetes").is_empty());
    }
}

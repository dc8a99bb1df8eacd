use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::models::*;
use crate::error::SeedError;

/// Fixed sample records the directory answers from. Read-only once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTables {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub reports: Vec<MedicalReport>,
}

static BUILTIN: Lazy<Arc<SeedTables>> = Lazy::new(|| Arc::new(SeedTables::builtin()));

/// Process-wide shared copy of the built-in tables.
pub fn builtin_tables() -> Arc<SeedTables> { BUILTIN.clone() }

impl SeedTables {
    pub fn builtin() -> Self {
        let doctor_name = "Dr. Sarah Smith";
        let slot = |id: &str, start: &str, end: &str, is_booked: bool| TimeSlot {
            id: id.into(),
            doctor_id: "d1".into(),
            date: "2025-04-15".into(),
            start_time: start.into(),
            end_time: end.into(),
            is_booked,
        };
        Self {
            doctors: vec![Doctor {
                id: "d1".into(),
                name: doctor_name.into(),
                email: "doctor@example.com".into(),
                specialization: "Cardiology".into(),
                qualifications: vec!["MD".into(), "PhD".into(), "FACC".into()],
                experience_years: 10,
                contact_number: "+1 (555) 123-4567".into(),
                available_days: vec!["Monday".into(), "Wednesday".into(), "Friday".into()],
                bio: "Dr. Sarah Smith is a board-certified cardiologist with over 10 years of experience in treating cardiovascular diseases.".into(),
            }],
            patients: vec![Patient {
                id: "p1".into(),
                name: "John Doe".into(),
                email: "patient@example.com".into(),
                date_of_birth: "1985-05-15".into(),
                gender: Gender::Male,
                contact_number: "+1 (555) 987-6543".into(),
                address: "123 Main St, Anytown, USA".into(),
                medical_history: vec!["Hypertension".into(), "Asthma".into()],
                allergies: vec!["Penicillin".into()],
                blood_type: BloodType::OPos,
            }],
            appointments: vec![
                Appointment {
                    id: "app1".into(),
                    doctor_id: "d1".into(),
                    doctor_name: doctor_name.into(),
                    patient_id: "p1".into(),
                    patient_name: "John Doe".into(),
                    date: "2025-04-15".into(),
                    time: "10:00 AM".into(),
                    duration_minutes: 30,
                    status: AppointmentStatus::Scheduled,
                    reason: "Annual checkup".into(),
                },
                Appointment {
                    id: "app2".into(),
                    doctor_id: "d1".into(),
                    doctor_name: doctor_name.into(),
                    patient_id: "p1".into(),
                    patient_name: "John Doe".into(),
                    date: "2025-04-05".into(),
                    time: "2:00 PM".into(),
                    duration_minutes: 45,
                    status: AppointmentStatus::Completed,
                    reason: "Chest pain".into(),
                },
            ],
            reports: vec![
                MedicalReport {
                    id: "rep1".into(),
                    patient_id: "p1".into(),
                    doctor_id: "d1".into(),
                    doctor_name: doctor_name.into(),
                    date: "2025-04-05".into(),
                    title: "Annual Physical Examination".into(),
                    content: "Patient is in good health overall. Blood pressure: 120/80 mmHg. Heart rate: 72 BPM. No significant findings.".into(),
                    report_type: ReportType::Consultation,
                },
                MedicalReport {
                    id: "rep2".into(),
                    patient_id: "p1".into(),
                    doctor_id: "d1".into(),
                    doctor_name: doctor_name.into(),
                    date: "2025-04-05".into(),
                    title: "Blood Test Results".into(),
                    content: "CBC: Normal\nCholesterol: 190 mg/dL (normal)\nGlucose: 95 mg/dL (normal)\nAll other parameters within normal range.".into(),
                    report_type: ReportType::LabResult,
                },
            ],
            time_slots: vec![
                slot("ts1", "9:00 AM", "9:30 AM", false),
                slot("ts2", "9:30 AM", "10:00 AM", false),
                slot("ts3", "10:00 AM", "10:30 AM", true),
                slot("ts4", "10:30 AM", "11:00 AM", false),
            ],
        }
    }

    /// Load custom tables from a JSON document and check their references.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let bytes = std::fs::read(path.as_ref())?;
        let tables: SeedTables = serde_json::from_slice(&bytes)?;
        tables.validate()?;
        info!(
            target: "vitahealth::directory",
            "seed.load path={:?} patients={} doctors={} appointments={} slots={} reports={}",
            path.as_ref(), tables.patients.len(), tables.doctors.len(), tables.appointments.len(), tables.time_slots.len(), tables.reports.len()
        );
        Ok(tables)
    }

    /// Every appointment, slot and report must point at a known doctor/patient.
    pub fn validate(&self) -> Result<(), SeedError> {
        let doctors: HashSet<&str> = self.doctors.iter().map(|d| d.id.as_str()).collect();
        let patients: HashSet<&str> = self.patients.iter().map(|p| p.id.as_str()).collect();
        let dangling = |kind, id: &str, target, target_id: &str| SeedError::DanglingReference {
            kind,
            id: id.to_string(),
            target,
            target_id: target_id.to_string(),
        };
        for a in &self.appointments {
            if !doctors.contains(a.doctor_id.as_str()) { return Err(dangling("appointment", &a.id, "doctor", &a.doctor_id)); }
            if !patients.contains(a.patient_id.as_str()) { return Err(dangling("appointment", &a.id, "patient", &a.patient_id)); }
        }
        for s in &self.time_slots {
            if !doctors.contains(s.doctor_id.as_str()) { return Err(dangling("time slot", &s.id, "doctor", &s.doctor_id)); }
        }
        for r in &self.reports {
            if !doctors.contains(r.doctor_id.as_str()) { return Err(dangling("report", &r.id, "doctor", &r.doctor_id)); }
            if !patients.contains(r.patient_id.as_str()) { return Err(dangling("report", &r.id, "patient", &r.patient_id)); }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_consistent() {
        let t = SeedTables::builtin();
        t.validate().unwrap();
        assert_eq!(t.appointments.len(), 2);
        assert_eq!(t.time_slots.len(), 4);
        assert_eq!(t.reports.len(), 2);
    }

    #[test]
    fn shared_builtin_is_one_allocation() {
        assert!(Arc::ptr_eq(&builtin_tables(), &builtin_tables()));
    }

    #[test]
    fn validate_flags_unknown_doctor() {
        let mut t = SeedTables::builtin();
        t.time_slots[0].doctor_id = "d9".into();
        match t.validate() {
            Err(SeedError::DanglingReference { kind, target_id, .. }) => {
                assert_eq!(kind, "time slot");
                assert_eq!(target_id, "d9");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn validate_flags_unknown_patient() {
        let mut t = SeedTables::builtin();
        t.appointments[1].patient_id = "p42".into();
        assert!(matches!(t.validate(), Err(SeedError::DanglingReference { target: "patient", .. })));
    }

    #[test]
    fn json_file_round_trips_builtin() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, serde_json::to_vec_pretty(&SeedTables::builtin()).unwrap()).unwrap();
        let loaded = SeedTables::from_json_file(&path).unwrap();
        assert_eq!(loaded.patients, SeedTables::builtin().patients);
        assert_eq!(loaded.time_slots, SeedTables::builtin().time_slots);
    }

    #[test]
    fn json_file_with_dangling_reference_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("seed.json");
        let mut t = SeedTables::builtin();
        t.doctors.clear();
        std::fs::write(&path, serde_json::to_vec(&t).unwrap()).unwrap();
        assert!(matches!(SeedTables::from_json_file(&path), Err(SeedError::DanglingReference { .. })));
    }
}

//!
//! vitahealth directory
//! --------------------
//! Read-only, identity-scoped queries over the seed tables. Every operation is a pure
//! filter: no mutation, no failure. Unknown ids yield `None` or an empty `Vec`.
//!
//! Callers depend on the `Directory` trait so a real persistence backend can replace
//! `SeedDirectory` without touching them.

use std::collections::HashSet;
use std::sync::Arc;

mod models;
mod seed;
pub mod views;
pub mod actions;

pub use models::{Appointment, AppointmentStatus, BloodType, Doctor, Gender, MedicalReport, Patient, PatientDetails, ReportType, TimeSlot};
pub use seed::{builtin_tables, SeedTables};

pub trait Directory: Send + Sync {
    fn find_patient_by_id(&self, id: &str) -> Option<Patient>;
    fn find_doctor_by_id(&self, id: &str) -> Option<Doctor>;
    fn appointments_for_patient(&self, patient_id: &str) -> Vec<Appointment>;
    fn appointments_for_doctor(&self, doctor_id: &str) -> Vec<Appointment>;
    fn reports_for_patient(&self, patient_id: &str) -> Vec<MedicalReport>;
    /// Slots for a doctor, narrowed to one exact `YYYY-MM-DD` date when given.
    fn availability_for_doctor(&self, doctor_id: &str, date: Option<&str>) -> Vec<TimeSlot>;
    /// Distinct patients the doctor has appointments with.
    fn patients_of_doctor(&self, doctor_id: &str) -> Vec<Patient>;

    fn patient_details(&self, patient_id: &str) -> PatientDetails {
        PatientDetails {
            patient: self.find_patient_by_id(patient_id),
            appointments: self.appointments_for_patient(patient_id),
            reports: self.reports_for_patient(patient_id),
        }
    }
}

/// `Directory` over in-memory seed tables shared by reference.
#[derive(Clone)]
pub struct SeedDirectory {
    tables: Arc<SeedTables>,
}

impl SeedDirectory {
    pub fn new(tables: Arc<SeedTables>) -> Self { Self { tables } }

    pub fn builtin() -> Self { Self::new(builtin_tables()) }

    pub fn tables(&self) -> &SeedTables { &self.tables }
}

impl Directory for SeedDirectory {
    fn find_patient_by_id(&self, id: &str) -> Option<Patient> {
        self.tables.patients.iter().find(|p| p.id == id).cloned()
    }

    fn find_doctor_by_id(&self, id: &str) -> Option<Doctor> {
        self.tables.doctors.iter().find(|d| d.id == id).cloned()
    }

    fn appointments_for_patient(&self, patient_id: &str) -> Vec<Appointment> {
        self.tables.appointments.iter().filter(|a| a.patient_id == patient_id).cloned().collect()
    }

    fn appointments_for_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        self.tables.appointments.iter().filter(|a| a.doctor_id == doctor_id).cloned().collect()
    }

    fn reports_for_patient(&self, patient_id: &str) -> Vec<MedicalReport> {
        self.tables.reports.iter().filter(|r| r.patient_id == patient_id).cloned().collect()
    }

    fn availability_for_doctor(&self, doctor_id: &str, date: Option<&str>) -> Vec<TimeSlot> {
        self.tables
            .time_slots
            .iter()
            .filter(|ts| ts.doctor_id == doctor_id && date.map_or(true, |d| ts.date == d))
            .cloned()
            .collect()
    }

    fn patients_of_doctor(&self, doctor_id: &str) -> Vec<Patient> {
        let ids: HashSet<&str> = self
            .tables
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .map(|a| a.patient_id.as_str())
            .collect();
        // each id resolves at most once, even if the table repeats it
        let mut seen: HashSet<&str> = HashSet::new();
        self.tables
            .patients
            .iter()
            .filter(|p| ids.contains(p.id.as_str()) && seen.insert(p.id.as_str()))
            .cloned()
            .collect()
    }
}

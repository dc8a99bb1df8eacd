//! Domain records served by the directory. Field names serialize in camelCase so seed
//! files can be shared with the web front end as-is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodType {
    pub fn label(&self) -> &'static str {
        match self {
            BloodType::APos => "A+",
            BloodType::ANeg => "A-",
            BloodType::BPos => "B+",
            BloodType::BNeg => "B-",
            BloodType::AbPos => "AB+",
            BloodType::AbNeg => "AB-",
            BloodType::OPos => "O+",
            BloodType::ONeg => "O-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReportType {
    #[serde(rename = "Lab Result")]
    LabResult,
    Consultation,
    Prescription,
    Radiology,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::LabResult => "Lab Result",
            ReportType::Consultation => "Consultation",
            ReportType::Prescription => "Prescription",
            ReportType::Radiology => "Radiology",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub contact_number: String,
    pub address: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub blood_type: BloodType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    #[serde(default)]
    pub qualifications: Vec<String>,
    /// Years of practice.
    #[serde(rename = "experience")]
    pub experience_years: u32,
    pub contact_number: String,
    #[serde(default)]
    pub available_days: Vec<String>,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub patient_id: String,
    pub patient_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Display time, e.g. `10:00 AM`
    pub time: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub reason: String,
}

impl Appointment {
    pub fn is_upcoming(&self) -> bool { self.status == AppointmentStatus::Scheduled }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub doctor_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_booked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub date: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
}

/// Composite read used by the doctor's patient-detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PatientDetails {
    pub patient: Option<Patient>,
    pub appointments: Vec<Appointment>,
    pub reports: Vec<MedicalReport>,
}

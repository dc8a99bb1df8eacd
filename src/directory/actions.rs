//! Acknowledgement-only actions. They check their input against the directory and return
//! the confirmation text to show; nothing is written back to the tables.

use chrono::NaiveDate;
use tracing::info;

use super::Directory;
use crate::error::{AppError, AppResult};

const INCOMPLETE_BOOKING: &str = "Please select a date, time slot, and provide a reason for your appointment";

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub doctor_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub start_time: String,
    pub reason: String,
}

pub fn acknowledge_booking(dir: &dyn Directory, req: &BookingRequest) -> AppResult<String> {
    if req.date.trim().is_empty() || req.start_time.trim().is_empty() || req.reason.trim().is_empty() {
        return Err(AppError::user("incomplete_booking", INCOMPLETE_BOOKING));
    }
    let day = NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::user("invalid_date".to_string(), format!("Invalid date '{}'", req.date)))?;
    let slots = dir.availability_for_doctor(&req.doctor_id, Some(req.date.trim()));
    let Some(slot) = slots.iter().find(|s| s.start_time == req.start_time) else {
        return Err(AppError::not_found(
            "slot_not_found".to_string(),
            format!("No time slot at {} on {}", req.start_time, req.date),
        ));
    };
    if slot.is_booked {
        return Err(AppError::conflict("slot_booked".to_string(), format!("The {} slot is already booked", slot.start_time)));
    }
    info!(target: "vitahealth::directory", "booking.ack doctor={} slot={}", req.doctor_id, slot.id);
    Ok(format!("Your appointment has been scheduled for {} at {}", day.format("%B %-d, %Y"), slot.start_time))
}

pub fn acknowledge_time_slot(start: &str, end: &str) -> AppResult<String> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(AppError::user("incomplete_slot", "Please provide a start and end time"));
    }
    Ok(format!("New availability added from {} to {}", start, end))
}

pub fn acknowledge_profile_update() -> String { "Your profile has been successfully updated".to_string() }

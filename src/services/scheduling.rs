use chrono::NaiveDate;

use crate::models::BookingRecord;

#[derive(Debug, PartialEq, Eq)]
pub enum SchedulingError {
    PastDate { date: NaiveDate },
    DateTaken { date: NaiveDate },
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::PastDate { date } => {
                write!(f, "{date} has already passed. Please pick today or a later date.")
            }
            SchedulingError::DateTaken { date } => {
                write!(f, "Sorry, {date} is already booked. Could you pick a different date?")
            }
        }
    }
}

/// One booking per calendar date, and never in the past. Runs once when the
/// user picks a date and once more inside the commit critical section, so a
/// record appended between pick and confirm still gets caught.
pub fn check_date(
    candidate: NaiveDate,
    today: NaiveDate,
    existing: &[BookingRecord],
) -> Result<(), SchedulingError> {
    if candidate < today {
        return Err(SchedulingError::PastDate { date: candidate });
    }

    if existing.iter().any(|b| b.move_date == candidate) {
        return Err(SchedulingError::DateTaken { date: candidate });
    }

    Ok(())
}

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{Actor, BookingRecord, Role};
use crate::services::scheduling;

use super::Storage;

/// The one key under which the booking collection lives, as a JSON array.
pub const BOOKINGS_KEY: &str = "sm_bookings";

/// Append-only booking collection over the keyed storage port. Every write is
/// a full read-modify-write of the array under [`BOOKINGS_KEY`], performed
/// while holding the storage lock.
#[derive(Clone)]
pub struct BookingStore {
    storage: Arc<Mutex<Box<dyn Storage>>>,
}

impl BookingStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    pub fn list(&self) -> Vec<BookingRecord> {
        let storage = self.storage.lock().unwrap();
        read_records(&**storage)
    }

    /// Records visible to the given actor: admins see everything, other roles
    /// see only bookings carrying their own email, anonymous callers see none.
    pub fn list_for(&self, actor: Option<&Actor>) -> Vec<BookingRecord> {
        let records = self.list();
        match actor {
            Some(actor) if actor.role == Role::Admin => records,
            Some(actor) => records
                .into_iter()
                .filter(|r| {
                    r.user
                        .as_ref()
                        .map_or(false, |u| u.email.eq_ignore_ascii_case(&actor.email))
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<BookingRecord> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Commit a finalized record. The date check runs again here, inside the
    /// same locked read-modify-write as the append, so the collection never
    /// ends up with two records on one date.
    pub fn confirm(
        &self,
        record: BookingRecord,
        today: NaiveDate,
    ) -> Result<BookingRecord, AppError> {
        let mut storage = self.storage.lock().unwrap();
        let mut records = read_records(&**storage);

        scheduling::check_date(record.move_date, today, &records)?;

        records.push(record.clone());
        write_records(&mut **storage, &records)?;

        tracing::info!(reference = %record.reference, move_date = %record.move_date, "booking confirmed");
        Ok(record)
    }

    /// Delete a record by id. Only terminal records may go; returns false when
    /// no record matches.
    pub fn remove(&self, id: &str) -> Result<bool, AppError> {
        let mut storage = self.storage.lock().unwrap();
        let mut records = read_records(&**storage);

        let pos = match records.iter().position(|r| r.id == id) {
            Some(pos) => pos,
            None => return Ok(false),
        };

        if !records[pos].status.is_terminal() {
            return Err(AppError::Validation(
                "only completed bookings can be deleted".to_string(),
            ));
        }

        records.remove(pos);
        write_records(&mut **storage, &records)?;
        Ok(true)
    }
}

fn read_records(storage: &dyn Storage) -> Vec<BookingRecord> {
    let raw = match storage.get(BOOKINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read booking store, treating as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "corrupted booking store, treating as empty");
            Vec::new()
        }
    }
}

fn write_records(storage: &mut dyn Storage, records: &[BookingRecord]) -> Result<(), AppError> {
    let raw = serde_json::to_string(records).map_err(anyhow::Error::from)?;
    storage.set(BOOKINGS_KEY, &raw)?;
    Ok(())
}

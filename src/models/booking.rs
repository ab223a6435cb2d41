use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::actor::{Actor, Role};

/// A finalized, persisted booking. Records are append-only: once written they
/// are never mutated, only removed by an explicit user delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub reference: String,
    pub created_at: NaiveDateTime,
    pub route: Route,
    pub move_date: NaiveDate,
    pub amount: i64,
    pub status: BookingStatus,
    pub payment_method: String,
    pub services: ServiceSelection,
    pub user: Option<UserSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Completed => "completed",
        }
    }

    /// Terminal records may be deleted but never transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSelection {
    #[serde(default)]
    pub packing: bool,
    #[serde(default)]
    pub storage: bool,
    #[serde(default)]
    pub insurance: bool,
}

/// Snapshot of the actor taken at confirmation time, so later session changes
/// do not rewrite booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserSnapshot {
    pub fn of(actor: &Actor) -> Self {
        Self {
            name: actor.name.clone(),
            email: actor.email.clone(),
            role: actor.role,
        }
    }
}

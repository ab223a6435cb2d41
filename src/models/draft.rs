use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::booking::{Route, ServiceSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Local,
    Intercity,
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeSize {
    Bedsitter,
    Studio,
    #[serde(rename = "1br")]
    OneBr,
    #[serde(rename = "2br")]
    TwoBr,
    #[serde(rename = "3br")]
    ThreeBr,
    #[serde(rename = "4br+")]
    FourBrPlus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// In-progress quote form state for one visit. Drafts live in memory only and
/// are discarded without a trace if the user walks away before confirming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub move_type: Option<MoveType>,
    pub move_date: Option<NaiveDate>,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub from_city: String,
    #[serde(default)]
    pub from_zip: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub to_city: String,
    #[serde(default)]
    pub to_zip: String,
    pub home_size: Option<HomeSize>,
    pub item_count: Option<u32>,
    #[serde(default)]
    pub services: ServiceSelection,
    #[serde(default)]
    pub contact: Contact,
}

impl BookingDraft {
    pub fn route(&self) -> Route {
        Route {
            from: join_location(&self.from_address, &self.from_city, &self.from_zip),
            to: join_location(&self.to_address, &self.to_city, &self.to_zip),
        }
    }
}

fn join_location(address: &str, city: &str, zip: &str) -> String {
    let mut parts = Vec::new();
    for part in [address, city, zip] {
        let part = part.trim();
        if !part.is_empty() {
            parts.push(part);
        }
    }
    parts.join(", ")
}

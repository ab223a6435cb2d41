use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Actor, BookingDraft, BookingRecord, Role};
use crate::services::access::{check_access, AccessDecision};
use crate::services::{scheduling, wizard};
use crate::state::AppState;

/// The actor is supplied by the front-end session layer via headers; this
/// service reads it, it does not authenticate.
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let role = headers
        .get("x-actor-role")
        .and_then(|v| v.to_str().ok())
        .and_then(Role::parse)?;
    let email = headers
        .get("x-actor-email")
        .and_then(|v| v.to_str().ok())?
        .to_string();
    let name = headers
        .get("x-actor-name")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    Some(Actor { name, email, role })
}

fn authorize(actor: Option<&Actor>, allowed: &[Role]) -> Result<(), AppError> {
    match check_access(actor.map(|a| a.role), allowed) {
        AccessDecision::Allow => Ok(()),
        AccessDecision::Deny if actor.is_none() => Err(AppError::Unauthorized),
        AccessDecision::Deny => Err(AppError::Forbidden),
    }
}

fn owns_record(actor: &Actor, record: &BookingRecord) -> bool {
    record
        .user
        .as_ref()
        .map_or(false, |u| u.email.eq_ignore_ascii_case(&actor.email))
}

fn parse_move_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid move date: {raw}")))
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    let actor = actor_from_headers(&headers);
    authorize(actor.as_ref(), &[Role::Client, Role::Mover, Role::Admin])?;

    Ok(Json(state.bookings.list_for(actor.as_ref())))
}

// GET /api/bookings/availability?date=YYYY-MM-DD
//
// The early interactive check. The same rule runs again at confirmation, so a
// "yes" here is advisory, not a reservation.
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub available: bool,
    pub reason: Option<String>,
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_move_date(&query.date)?;
    let today = Utc::now().date_naive();

    let records = state.bookings.list();
    let result = scheduling::check_date(date, today, &records);

    Ok(Json(AvailabilityResponse {
        date: date.to_string(),
        available: result.is_ok(),
        reason: result.err().map(|e| e.to_string()),
    }))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<BookingRecord>), AppError> {
    let actor = actor_from_headers(&headers);
    let now = Utc::now();

    let record = wizard::finalize(&draft, actor.as_ref(), now)?;
    let record = state.bookings.confirm(record, now.date_naive())?;

    Ok((StatusCode::CREATED, Json(record)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingRecord>, AppError> {
    let actor = actor_from_headers(&headers);
    authorize(actor.as_ref(), &[Role::Client, Role::Mover, Role::Admin])?;

    let record = state
        .bookings
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    // Non-admins cannot probe other users' bookings by id.
    if let Some(actor) = actor.as_ref() {
        if actor.role != Role::Admin && !owns_record(actor, &record) {
            return Err(AppError::NotFound(format!("booking {id}")));
        }
    }

    Ok(Json(record))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let actor = actor_from_headers(&headers);
    authorize(actor.as_ref(), &[Role::Client, Role::Admin])?;

    if let Some(actor) = actor.as_ref() {
        if actor.role != Role::Admin {
            match state.bookings.get(&id) {
                Some(record) if owns_record(actor, &record) => {}
                Some(_) => return Err(AppError::Forbidden),
                None => return Err(AppError::NotFound(format!("booking {id}"))),
            }
        }
    }

    if state.bookings.remove(&id)? {
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound(format!("booking {id}")))
    }
}

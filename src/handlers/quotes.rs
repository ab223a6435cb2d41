use axum::Json;
use serde::Serialize;

use crate::models::{BookingDraft, ServiceSelection};
use crate::services::pricing;

#[derive(Serialize)]
pub struct QuoteResponse {
    pub amount: i64,
    pub base_fare: i64,
    pub services: ServiceSelection,
}

// POST /api/bookings/quote
//
// Prices a draft without persisting anything.
pub async fn get_quote(Json(draft): Json<BookingDraft>) -> Json<QuoteResponse> {
    Json(QuoteResponse {
        amount: pricing::quote_amount(&draft.services),
        base_fare: pricing::BASE_FARE,
        services: draft.services,
    })
}

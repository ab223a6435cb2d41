use crate::models::ServiceSelection;

/// Flat base fare in KES, before optional services.
pub const BASE_FARE: i64 = 89_900;

pub const PACKING_SURCHARGE: i64 = 15_000;
pub const STORAGE_SURCHARGE: i64 = 20_000;
pub const INSURANCE_SURCHARGE: i64 = 10_000;

pub fn quote_amount(services: &ServiceSelection) -> i64 {
    let mut total = BASE_FARE;
    if services.packing {
        total += PACKING_SURCHARGE;
    }
    if services.storage {
        total += STORAGE_SURCHARGE;
    }
    if services.insurance {
        total += INSURANCE_SURCHARGE;
    }
    total
}

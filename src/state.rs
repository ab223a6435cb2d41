use crate::config::AppConfig;
use crate::store::BookingStore;

pub struct AppState {
    pub bookings: BookingStore,
    pub config: AppConfig,
}

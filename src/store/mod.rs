pub mod bookings;
pub mod memory;
pub mod sqlite;

pub use bookings::{BookingStore, BOOKINGS_KEY};
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Keyed storage port. Reads and writes are synchronous whole-value
/// operations; anything richer (filtering, upserts) lives above this seam.
pub trait Storage: Send {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

//! SQLite-Backend-Implementierung des KontoRepository

pub mod pool;
pub mod users;

pub use pool::SqliteDb;

//! konto-db – Konto-Store
//!
//! Dieses Crate stellt das Repository-Pattern fuer den einzigen Datensatztyp
//! (Konto) bereit. [`KontoRepository`] entkoppelt den Auth-Service von der
//! konkreten Datenbank, [`SqliteDb`] ist die SQLite-Implementierung.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use models::{KontoRecord, KontoUpdate, NeuesKonto};
pub use repository::{DatabaseConfig, DbResult, KontoRepository};
pub use sqlite::SqliteDb;

//! konto-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die Identifikations- und Berechtigungstypen bereit,
//! die von Store, Auth-Service und REST-Schicht gemeinsam genutzt werden.

pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use types::{AdminStufe, KontoId};

//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Der Auth-Service bekommt den Store als
//! `Arc<R: KontoRepository>` injiziert.

use std::future::Future;
use std::time::Duration;

use konto_core::KontoId;

use crate::error::DbError;
use crate::models::{KontoRecord, KontoUpdate, NeuesKonto};

/// Result-Alias fuer das Datenbank-Crate
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://konto.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
    /// Wartezeit auf eine freie Verbindung, danach gilt der Store als nicht verfuegbar
    pub verbindungs_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://konto.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
            verbindungs_timeout: Duration::from_secs(5),
        }
    }
}

/// Repository fuer Konto-Datenzugriffe
///
/// Alle Methoden muessen nebenlaeufige Aufrufe vertragen. Die Eindeutigkeit
/// der E-Mail wird vom Store selbst durchgesetzt.
pub trait KontoRepository: Send + Sync {
    /// Legt ein Konto an, `DbError::Eindeutigkeit` bei vergebener E-Mail
    fn create(&self, data: NeuesKonto<'_>) -> impl Future<Output = DbResult<KontoId>> + Send;

    /// Laedt ein Konto anhand seiner ID
    fn get_by_id(&self, id: KontoId) -> impl Future<Output = DbResult<Option<KontoRecord>>> + Send;

    /// Laedt ein Konto anhand der E-Mail (exakter Vergleich, keine Normalisierung)
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = DbResult<Option<KontoRecord>>> + Send;

    /// Wendet eine Aenderung an, `DbError::NichtGefunden` wenn keine Zeile betroffen war
    fn update(&self, id: KontoId, update: KontoUpdate) -> impl Future<Output = DbResult<()>> + Send;

    /// Loescht ein Konto endgueltig. Gibt `false` zurueck wenn es nicht existierte.
    fn delete(&self, id: KontoId) -> impl Future<Output = DbResult<bool>> + Send;
}

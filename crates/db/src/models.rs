//! Datenbankmodelle fuer den Konto-Store
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den Antworttypen des Auth-Service getrennt und dienen als
//! reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use konto_core::{AdminStufe, KontoId};

/// Konto-Datensatz aus der Datenbank
#[derive(Clone, PartialEq, Eq)]
pub struct KontoRecord {
    pub id: KontoId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub admin_level: AdminStufe,
    pub created_at: DateTime<Utc>,
}

// Der Hash landet nie in Logs
impl std::fmt::Debug for KontoRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KontoRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<verborgen>")
            .field("admin_level", &self.admin_level)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Daten zum Anlegen eines neuen Kontos
#[derive(Clone, Copy)]
pub struct NeuesKonto<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Aenderung an einem bestehenden Konto
///
/// Feste Varianten statt dynamisch zusammengesetztem SQL: jede Variante hat
/// genau ein parametrisiertes Statement.
#[derive(Clone, PartialEq, Eq)]
pub enum KontoUpdate {
    Name(String),
    Passwort(String),
    NameUndPasswort { name: String, password_hash: String },
}

impl KontoUpdate {
    /// Baut die passende Variante aus den optional gesetzten Feldern.
    ///
    /// Gibt `None` zurueck wenn kein Feld gesetzt ist.
    pub fn aus_feldern(name: Option<String>, password_hash: Option<String>) -> Option<Self> {
        match (name, password_hash) {
            (Some(name), Some(password_hash)) => Some(Self::NameUndPasswort {
                name,
                password_hash,
            }),
            (Some(name), None) => Some(Self::Name(name)),
            (None, Some(password_hash)) => Some(Self::Passwort(password_hash)),
            (None, None) => None,
        }
    }

    pub fn aendert_passwort(&self) -> bool {
        matches!(self, Self::Passwort(_) | Self::NameUndPasswort { .. })
    }
}

impl std::fmt::Debug for KontoUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Passwort(_) => f.write_str("Passwort(<verborgen>)"),
            Self::NameUndPasswort { name, .. } => f
                .debug_struct("NameUndPasswort")
                .field("name", name)
                .field("password_hash", &"<verborgen>")
                .finish(),
        }
    }
}

//! Gemeinsame Identifikationstypen
//!
//! IDs verwenden das Newtype-Pattern um Verwechslungen mit anderen
//! Ganzzahlen (z.B. der Admin-Stufe) zur Compilezeit auszuschliessen.

use serde::{Deserialize, Serialize};

/// Eindeutige Konto-ID
///
/// Wird vom Store beim Anlegen vergeben und danach nie mehr veraendert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KontoId(pub i64);

impl KontoId {
    /// Gibt den inneren Zahlenwert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for KontoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for KontoId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Berechtigungsstufe eines Kontos
///
/// `0` = normaler Benutzer, `2` = Super-Admin. Andere Werte sind reserviert
/// und verleihen keine zusaetzlichen Rechte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminStufe(pub i64);

impl AdminStufe {
    pub const BENUTZER: Self = Self(0);
    pub const SUPER_ADMIN: Self = Self(2);

    /// Darf fremde Konten loeschen
    pub fn ist_super_admin(&self) -> bool {
        *self == Self::SUPER_ADMIN
    }
}

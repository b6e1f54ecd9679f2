//! Ein- und Ausgabetypen des KontoService

use konto_core::{AdminStufe, KontoId};
use konto_db::KontoRecord;
use serde::Serialize;

/// Oeffentliche Sicht auf ein Konto (ohne Hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KontoProfil {
    pub id: KontoId,
    pub name: String,
    pub email: String,
    pub admin_level: AdminStufe,
}

impl From<KontoRecord> for KontoProfil {
    fn from(record: KontoRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            admin_level: record.admin_level,
        }
    }
}

/// Ergebnis eines erfolgreichen Logins
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anmeldung {
    pub token: String,
    pub account_id: KontoId,
}

impl std::fmt::Debug for Anmeldung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anmeldung")
            .field("token", &"<verborgen>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Gewuenschte Aenderung an einem Profil
///
/// Leere Strings gelten als "nicht angegeben".
#[derive(Clone, Copy, Default)]
pub struct ProfilAenderung<'a> {
    pub aktuelles_passwort: &'a str,
    pub name: Option<&'a str>,
    pub neues_passwort: Option<&'a str>,
    pub passwort_bestaetigung: Option<&'a str>,
}

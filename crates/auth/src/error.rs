//! Fehlertypen fuer den Auth-Service

use konto_db::DbError;
use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
///
/// Infrastruktur-Varianten tragen bewusst keine Details: die werden beim
/// Entstehen geloggt und verlassen den Service nicht.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    #[error("E-Mail bereits vergeben")]
    EmailVergeben,

    #[error("Konto nicht gefunden")]
    NichtGefunden,

    // --- Authentifizierung ---
    #[error("Token fehlt, ist ungueltig oder abgelaufen")]
    NichtAuthentifiziert,

    #[error("Zugriff verweigert")]
    Verboten,

    #[error("Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Infrastruktur ---
    #[error("Konto-Store nicht verfuegbar")]
    SpeicherNichtVerfuegbar,

    #[error("Passwort-Hashing fehlgeschlagen")]
    PasswortHashing,

    #[error("Token konnte nicht ausgestellt werden")]
    TokenAusstellung,

    // --- Start ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),
}

impl AuthError {
    pub fn validierung(msg: impl Into<String>) -> Self {
        Self::Validierung(msg.into())
    }

    /// Serverseitiger Fehler, Details gehoeren nur ins Log
    pub fn ist_infrastruktur(&self) -> bool {
        matches!(
            self,
            Self::SpeicherNichtVerfuegbar
                | Self::PasswortHashing
                | Self::TokenAusstellung
                | Self::Konfiguration(_)
        )
    }
}

impl From<DbError> for AuthError {
    fn from(e: DbError) -> Self {
        if e.ist_eindeutigkeit() {
            Self::EmailVergeben
        } else if e.ist_nicht_gefunden() {
            Self::NichtGefunden
        } else {
            tracing::error!(fehler = %e, "Konto-Store nicht verfuegbar");
            Self::SpeicherNichtVerfuegbar
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_fehler_werden_abgebildet() {
        assert_eq!(
            AuthError::from(DbError::Eindeutigkeit("email".into())),
            AuthError::EmailVergeben
        );
        assert_eq!(
            AuthError::from(DbError::nicht_gefunden("Konto 3")),
            AuthError::NichtGefunden
        );
        assert_eq!(
            AuthError::from(DbError::intern("connection reset by peer")),
            AuthError::SpeicherNichtVerfuegbar
        );
    }

    #[test]
    fn interne_details_verlassen_den_service_nicht() {
        let e = AuthError::from(DbError::intern("/var/lib/konto.db: disk I/O error"));
        assert!(!e.to_string().contains("disk"));
    }

    #[test]
    fn infrastruktur_erkennung() {
        assert!(AuthError::SpeicherNichtVerfuegbar.ist_infrastruktur());
        assert!(AuthError::PasswortHashing.ist_infrastruktur());
        assert!(AuthError::Konfiguration("x".into()).ist_infrastruktur());
        assert!(!AuthError::validierung("x").ist_infrastruktur());
        assert!(!AuthError::Verboten.ist_infrastruktur());
    }
}

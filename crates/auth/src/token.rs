//! Signierte, zeitlich begrenzte Identitaets-Tokens
//!
//! Tokens sind zustandslos: Gueltigkeit ergibt sich nur aus Signatur und
//! Ablaufzeit. Es gibt keine Sperrliste, ein Token bleibt bis zum Ablauf
//! gueltig.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use konto_core::KontoId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AuthError, AuthResult};

/// Standard-Lebensdauer eines Tokens: 1 Stunde
pub const STANDARD_LEBENSDAUER: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Konto-ID als Dezimalstring
    sub: String,
    iat: i64,
    exp: i64,
}

/// Token ist kaputt, falsch signiert oder abgelaufen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Token ungueltig oder abgelaufen")]
pub struct TokenUngueltig;

/// Stellt Tokens aus und prueft sie
///
/// Der Schluessel wird einmalig beim Start gesetzt.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lebensdauer: chrono::Duration,
}

impl TokenService {
    /// Erstellt einen TokenService mit HS256-Schluessel und Lebensdauer
    pub fn neu(geheimnis: &[u8], lebensdauer: Duration) -> AuthResult<Self> {
        if geheimnis.is_empty() {
            return Err(AuthError::Konfiguration(
                "Token-Schluessel darf nicht leer sein".into(),
            ));
        }
        let lebensdauer = chrono::Duration::from_std(lebensdauer)
            .ok()
            .filter(|d| Utc::now().checked_add_signed(*d).is_some())
            .ok_or_else(|| {
                AuthError::Konfiguration(format!(
                    "Token-Lebensdauer zu gross: {} s",
                    lebensdauer.as_secs()
                ))
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(geheimnis),
            decoding_key: DecodingKey::from_secret(geheimnis),
            validation,
            lebensdauer,
        })
    }

    /// Stellt ein Token fuer das Konto aus, gueltig ab jetzt
    pub fn ausstellen(&self, konto_id: KontoId) -> AuthResult<String> {
        self.ausstellen_ab(konto_id, Utc::now())
    }

    pub(crate) fn ausstellen_ab(
        &self,
        konto_id: KontoId,
        ausgestellt_am: DateTime<Utc>,
    ) -> AuthResult<String> {
        let ablauf = ausgestellt_am
            .checked_add_signed(self.lebensdauer)
            .ok_or_else(|| {
                tracing::error!(konto_id = %konto_id, "Token-Ablaufzeit ausserhalb des Wertebereichs");
                AuthError::TokenAusstellung
            })?;
        let claims = Claims {
            sub: konto_id.to_string(),
            iat: ausgestellt_am.timestamp(),
            exp: ablauf.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(fehler = %e, "Token-Signierung fehlgeschlagen");
            AuthError::TokenAusstellung
        })
    }

    /// Prueft Signatur und Ablauf, gibt die Konto-ID zurueck
    pub fn verifizieren(&self, token: &str) -> Result<KontoId, TokenUngueltig> {
        let daten = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(fehler = %e, "Token-Pruefung fehlgeschlagen");
            TokenUngueltig
        })?;

        daten.claims.sub.parse().map_err(|_| {
            tracing::debug!("Token-Subject ist keine Konto-ID");
            TokenUngueltig
        })
    }
}

// Schluessel nie ausgeben
impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lebensdauer", &self.lebensdauer)
            .finish_non_exhaustive()
    }
}

//! Passwort-Hashing mit Argon2id
//!
//! Jeder Hash bekommt ein frisches Salt. Der PHC-String enthaelt Algorithmus,
//! Parameter und Salt, die Verifikation liest sie von dort. Die Kosten werden
//! einmalig beim Start festgelegt.
//!
//! Hashen ist absichtlich teuer. Die `_async`-Varianten laufen deshalb auf dem
//! Blocking-Pool von tokio, damit kein Worker-Thread blockiert wird.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Argon2id-Kostenparameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashKonfig {
    /// Speicherbedarf in KiB
    pub speicher_kib: u32,
    /// Anzahl Iterationen
    pub iterationen: u32,
    /// Parallelismus (Lanes)
    pub parallelismus: u32,
}

/// Werte gemaess OWASP-Empfehlungen:
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
impl Default for HashKonfig {
    fn default() -> Self {
        Self {
            speicher_kib: 64 * 1024,
            iterationen: 3,
            parallelismus: 1,
        }
    }
}

/// Hasht und verifiziert Passwoerter mit festen Argon2id-Parametern
#[derive(Debug, Clone)]
pub struct PasswortHasher {
    params: Params,
}

impl PasswortHasher {
    /// Erstellt einen Hasher, schlaegt bei ungueltigen Parametern fehl
    pub fn neu(konfig: HashKonfig) -> AuthResult<Self> {
        let params = Params::new(
            konfig.speicher_kib,
            konfig.iterationen,
            konfig.parallelismus,
            None, // output_len: Standard (32 Bytes)
        )
        .map_err(|e| AuthError::Konfiguration(format!("Argon2-Parameter ungueltig: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hasht ein Passwort mit einem zufaelligen Salt
    ///
    /// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(fehler = %e, "Passwort-Hashing fehlgeschlagen");
                AuthError::PasswortHashing
            })
    }

    /// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// Der Digest-Vergleich ist zeitkonstant. Ein kaputter Hash ergibt
    /// `false`, nie einen Fehler.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(fehler = %e, "Gespeicherter Hash hat ungueltiges Format");
                return false;
            }
        };

        self.argon2()
            .verify_password(passwort.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Wie [`Self::hashen`], aber auf dem Blocking-Pool
    pub async fn hashen_async(&self, passwort: &str) -> AuthResult<String> {
        let hasher = self.clone();
        let passwort = passwort.to_owned();

        tokio::task::spawn_blocking(move || hasher.hashen(&passwort))
            .await
            .map_err(|e| {
                tracing::error!(fehler = %e, "Hashing-Task abgebrochen");
                AuthError::PasswortHashing
            })?
    }

    /// Wie [`Self::verifizieren`], aber auf dem Blocking-Pool
    pub async fn verifizieren_async(&self, passwort: &str, hash: &str) -> AuthResult<bool> {
        let hasher = self.clone();
        let passwort = passwort.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verifizieren(&passwort, &hash))
            .await
            .map_err(|e| {
                tracing::error!(fehler = %e, "Verifikations-Task abgebrochen");
                AuthError::PasswortHashing
            })
    }
}

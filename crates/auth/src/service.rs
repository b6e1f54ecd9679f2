//! Konto-Service
//!
//! Zentraler Service fuer Registrierung, Login, Profilabruf, Profilaenderung
//! und Loeschung. Nutzt das injizierte KontoRepository, den Passwort-Hasher
//! und den TokenService.

use std::sync::Arc;

use konto_core::KontoId;
use konto_db::{KontoRepository, KontoUpdate, NeuesKonto};

use crate::{
    error::{AuthError, AuthResult},
    models::{Anmeldung, KontoProfil, ProfilAenderung},
    password::PasswortHasher,
    token::TokenService,
};

/// Konto-Service – zentraler Einstiegspunkt fuer alle Kontovorgaenge
pub struct KontoService<R: KontoRepository> {
    repo: Arc<R>,
    hasher: PasswortHasher,
    tokens: Arc<TokenService>,
}

fn nicht_leer(wert: Option<&str>) -> Option<&str> {
    wert.filter(|w| !w.is_empty())
}

impl<R: KontoRepository> KontoService<R> {
    /// Erstellt einen neuen KontoService
    pub fn neu(repo: Arc<R>, hasher: PasswortHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    /// Prueft das Token des Aufrufers
    fn aufrufer(&self, token: &str) -> AuthResult<KontoId> {
        self.tokens
            .verifizieren(token)
            .map_err(|_| AuthError::NichtAuthentifiziert)
    }

    /// Registriert ein neues Konto und gibt dessen ID zurueck
    pub async fn registrieren(
        &self,
        name: &str,
        email: &str,
        passwort: &str,
        passwort_bestaetigung: &str,
    ) -> AuthResult<KontoId> {
        if name.is_empty() {
            return Err(AuthError::validierung("Name fehlt"));
        }
        if email.is_empty() {
            return Err(AuthError::validierung("E-Mail fehlt"));
        }
        if passwort.is_empty() {
            return Err(AuthError::validierung("Passwort fehlt"));
        }
        if passwort != passwort_bestaetigung {
            return Err(AuthError::validierung("Passwoerter stimmen nicht ueberein"));
        }

        let passwort_hash = self.hasher.hashen_async(passwort).await?;

        let id = self
            .repo
            .create(NeuesKonto {
                name,
                email,
                password_hash: &passwort_hash,
            })
            .await?;

        tracing::info!(konto_id = %id, "Neues Konto registriert");
        Ok(id)
    }

    /// Meldet ein Konto an und stellt ein Token aus
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<Anmeldung> {
        if email.is_empty() {
            return Err(AuthError::validierung("E-Mail fehlt"));
        }
        if passwort.is_empty() {
            return Err(AuthError::validierung("Passwort fehlt"));
        }

        let konto = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::NichtGefunden)?;

        let korrekt = self
            .hasher
            .verifizieren_async(passwort, &konto.password_hash)
            .await?;
        if !korrekt {
            tracing::warn!(konto_id = %konto.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.tokens.ausstellen(konto.id)?;

        tracing::info!(konto_id = %konto.id, "Konto angemeldet");
        Ok(Anmeldung {
            token,
            account_id: konto.id,
        })
    }

    /// Laedt das Profil eines beliebigen Kontos
    ///
    /// Jeder angemeldete Aufrufer darf jedes Profil lesen, es gibt keine
    /// Besitzpruefung.
    pub async fn profil_laden(&self, id: KontoId, token: &str) -> AuthResult<KontoProfil> {
        self.aufrufer(token)?;

        let konto = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(AuthError::NichtGefunden)?;

        Ok(KontoProfil::from(konto))
    }

    /// Aendert Name und/oder Passwort eines Kontos
    ///
    /// Das aktuelle Passwort wird gegen das Zielkonto geprueft, nicht gegen
    /// den Aufrufer. Wer das Passwort eines fremden Kontos kennt, kann es
    /// damit aendern.
    pub async fn profil_aktualisieren(
        &self,
        ziel: KontoId,
        token: &str,
        aenderung: ProfilAenderung<'_>,
    ) -> AuthResult<()> {
        let aufrufer = self.aufrufer(token)?;

        if aenderung.aktuelles_passwort.is_empty() {
            return Err(AuthError::validierung("Aktuelles Passwort fehlt"));
        }

        let konto = self
            .repo
            .get_by_id(ziel)
            .await?
            .ok_or(AuthError::NichtGefunden)?;

        let korrekt = self
            .hasher
            .verifizieren_async(aenderung.aktuelles_passwort, &konto.password_hash)
            .await?;
        if !korrekt {
            tracing::warn!(konto_id = %ziel, aufrufer = %aufrufer, "Aktuelles Passwort falsch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let name = nicht_leer(aenderung.name);
        let neues_passwort = nicht_leer(aenderung.neues_passwort);

        if let Some(neu) = neues_passwort {
            if Some(neu) != aenderung.passwort_bestaetigung {
                return Err(AuthError::validierung("Passwoerter stimmen nicht ueberein"));
            }
        }
        if name.is_none() && neues_passwort.is_none() {
            return Err(AuthError::validierung("Keine Felder zum Aktualisieren"));
        }

        let neuer_hash = match neues_passwort {
            Some(neu) => Some(self.hasher.hashen_async(neu).await?),
            None => None,
        };

        let update = KontoUpdate::aus_feldern(name.map(str::to_owned), neuer_hash)
            .ok_or_else(|| AuthError::validierung("Keine Felder zum Aktualisieren"))?;
        let passwort_geaendert = update.aendert_passwort();

        self.repo.update(ziel, update).await?;

        tracing::info!(
            konto_id = %ziel,
            aufrufer = %aufrufer,
            passwort_geaendert,
            "Konto aktualisiert"
        );
        Ok(())
    }

    /// Loescht ein Konto endgueltig
    ///
    /// Erlaubt fuer das eigene Konto oder wenn der Aufrufer aktuell
    /// Super-Admin ist. In beiden Faellen muss das Passwort des Zielkontos
    /// stimmen.
    pub async fn konto_loeschen(
        &self,
        ziel: KontoId,
        token: &str,
        passwort: &str,
    ) -> AuthResult<()> {
        let aufrufer = self.aufrufer(token)?;

        if passwort.is_empty() {
            return Err(AuthError::validierung("Passwort fehlt"));
        }

        let konto = self
            .repo
            .get_by_id(ziel)
            .await?
            .ok_or(AuthError::NichtGefunden)?;

        let korrekt = self
            .hasher
            .verifizieren_async(passwort, &konto.password_hash)
            .await?;
        if !korrekt {
            tracing::warn!(konto_id = %ziel, aufrufer = %aufrufer, "Falsches Passwort beim Loeschen");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        if aufrufer != ziel {
            // Admin-Stufe immer frisch laden, das Token traegt sie nicht
            let ist_admin = self
                .repo
                .get_by_id(aufrufer)
                .await?
                .is_some_and(|k| k.admin_level.ist_super_admin());
            if !ist_admin {
                tracing::warn!(konto_id = %ziel, aufrufer = %aufrufer, "Loeschen fremden Kontos verweigert");
                return Err(AuthError::Verboten);
            }
        }

        if !self.repo.delete(ziel).await? {
            return Err(AuthError::NichtGefunden);
        }

        tracing::info!(konto_id = %ziel, aufrufer = %aufrufer, "Konto geloescht");
        Ok(())
    }
}

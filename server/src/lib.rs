//! konto-server – Bibliotheks-Root
//!
//! Verdrahtet Datenbank, Passwort-Hasher, TokenService, KontoService und
//! REST-Server.

pub mod config;

use std::sync::Arc;

use anyhow::Result;
use config::ServerConfig;
use konto_auth::{KontoService, PasswortHasher, TokenService};
use konto_db::SqliteDb;
use konto_rest::{AppState, RestServer};

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Token-Schluessel und Hash-Parameter pruefen
    /// 2. Datenbankverbindung herstellen, Migrationen ausfuehren
    /// 3. REST-API starten
    /// 4. Auf Ctrl-C warten, danach Pool schliessen
    pub async fn starten(self) -> Result<()> {
        let hasher = PasswortHasher::neu(self.config.hash_konfig())?;
        let tokens = Arc::new(TokenService::neu(
            self.config.token_geheimnis()?.as_bytes(),
            self.config.token_lebensdauer(),
        )?);
        let rest = RestServer::neu(self.config.rest_konfig()?);

        tracing::info!(
            url = %self.config.datenbank.url,
            max_verbindungen = self.config.datenbank.max_verbindungen,
            "Datenbankverbindung wird hergestellt"
        );
        let db = Arc::new(SqliteDb::oeffnen(&self.config.datenbank_config()).await?);

        let service = Arc::new(KontoService::neu(Arc::clone(&db), hasher, tokens));

        tracing::info!(
            adresse = %self.config.rest_bind_adresse(),
            token_lebensdauer_secs = self.config.token.lebensdauer_secs,
            "Server startet"
        );
        rest.starten(AppState::neu(service), shutdown_signal()).await?;

        db.schliessen().await;
        tracing::info!("Server beendet");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}

//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder ausser dem
//! Token-Schluessel haben sinnvolle Standardwerte. Einzelne Werte lassen sich
//! per Umgebungsvariable ueberschreiben:
//!
//! - `KONTO_JWT_SECRET`: Schluessel fuer die Token-Signatur
//! - `KONTO_DATABASE_URL`: Datenbank-URL

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use konto_auth::HashKonfig;
use konto_db::DatabaseConfig;
use konto_rest::RestServerKonfig;
use serde::{Deserialize, Serialize};

pub const ENV_JWT_SECRET: &str = "KONTO_JWT_SECRET";
pub const ENV_DATABASE_URL: &str = "KONTO_DATABASE_URL";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token-Einstellungen
    pub token: TokenEinstellungen,
    /// Kosten des Passwort-Hashings
    pub passwort: PasswortEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// REST-Einstellungen
    pub rest: RestEinstellungen,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub port: u16,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 3002,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub sqlite_wal: bool,
    /// Wartezeit auf eine freie Verbindung in Sekunden
    pub verbindungs_timeout_secs: u64,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let standard = DatabaseConfig::default();
        Self {
            url: standard.url,
            max_verbindungen: standard.max_verbindungen,
            sqlite_wal: standard.sqlite_wal,
            verbindungs_timeout_secs: standard.verbindungs_timeout.as_secs(),
        }
    }
}

/// Token-Einstellungen
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    /// HS256-Schluessel. Ohne Schluessel startet der Server nicht.
    #[serde(skip_serializing)]
    pub geheimnis: Option<String>,
    /// Gueltigkeitsdauer eines Tokens in Sekunden
    pub lebensdauer_secs: u64,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self {
            geheimnis: None,
            lebensdauer_secs: konto_auth::STANDARD_LEBENSDAUER.as_secs(),
        }
    }
}

impl std::fmt::Debug for TokenEinstellungen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEinstellungen")
            .field("geheimnis", &self.geheimnis.as_ref().map(|_| "<verborgen>"))
            .field("lebensdauer_secs", &self.lebensdauer_secs)
            .finish()
    }
}

/// Argon2id-Kosten
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswortEinstellungen {
    /// Speicherbedarf in KiB
    pub speicher_kib: u32,
    pub iterationen: u32,
    pub parallelismus: u32,
}

impl Default for PasswortEinstellungen {
    fn default() -> Self {
        let standard = HashKonfig::default();
        Self {
            speicher_kib: standard.speicher_kib,
            iterationen: standard.iterationen,
            parallelismus: standard.parallelismus,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// REST-Einstellungen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestEinstellungen {
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt `None` zurueck wenn die Datei nicht existiert.
    /// Laeuft vor der Logging-Initialisierung und loggt deshalb nicht.
    pub fn aus_datei(pfad: &str) -> anyhow::Result<Option<Self>> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(Some(config))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Uebernimmt Overrides aus den Umgebungsvariablen des Prozesses
    pub fn umgebung_anwenden(&mut self) {
        self.ueberschreiben_mit(|name| std::env::var(name).ok());
    }

    /// Uebernimmt Overrides aus einer beliebigen Quelle
    pub fn ueberschreiben_mit(&mut self, quelle: impl Fn(&str) -> Option<String>) {
        if let Some(geheimnis) = quelle(ENV_JWT_SECRET).filter(|s| !s.is_empty()) {
            self.token.geheimnis = Some(geheimnis);
        }
        if let Some(url) = quelle(ENV_DATABASE_URL).filter(|s| !s.is_empty()) {
            self.datenbank.url = url;
        }
    }

    /// Gibt die Bind-Adresse fuer die REST-API zurueck
    pub fn rest_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.port)
    }

    /// Signatur-Schluessel, Fehler wenn keiner gesetzt ist
    pub fn token_geheimnis(&self) -> anyhow::Result<&str> {
        self.token
            .geheimnis
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Kein Token-Schluessel konfiguriert ([token] geheimnis oder {ENV_JWT_SECRET})"
                )
            })
    }

    pub fn token_lebensdauer(&self) -> Duration {
        Duration::from_secs(self.token.lebensdauer_secs)
    }

    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.sqlite_wal,
            verbindungs_timeout: Duration::from_secs(self.datenbank.verbindungs_timeout_secs),
        }
    }

    pub fn hash_konfig(&self) -> HashKonfig {
        HashKonfig {
            speicher_kib: self.passwort.speicher_kib,
            iterationen: self.passwort.iterationen,
            parallelismus: self.passwort.parallelismus,
        }
    }

    pub fn rest_konfig(&self) -> anyhow::Result<RestServerKonfig> {
        let adresse = self.rest_bind_adresse();
        let bind_addr: SocketAddr = adresse
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{adresse}'"))?;
        Ok(RestServerKonfig {
            bind_addr,
            cors_origins: self.rest.cors_origins.clone(),
        })
    }
}

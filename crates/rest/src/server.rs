//! Axum HTTP-Server fuer den Konto-Service

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Result;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::Router;
use konto_db::KontoRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{routes::router, AppState};

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct RestServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

impl Default for RestServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3002)),
            cors_origins: vec![],
        }
    }
}

/// Axum HTTP-Server fuer den Konto-Service
pub struct RestServer {
    konfig: RestServerKonfig,
}

impl RestServer {
    pub fn neu(konfig: RestServerKonfig) -> Self {
        Self { konfig }
    }

    fn cors(&self) -> CorsLayer {
        if self.konfig.cors_origins.is_empty() {
            return CorsLayer::permissive();
        }

        let origins: Vec<HeaderValue> = self
            .konfig
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ungueltiger CORS-Origin ignoriert");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any)
    }

    /// Baut die vollstaendige App mit Trace- und CORS-Layer
    pub fn app<R: KontoRepository + 'static>(&self, state: AppState<R>) -> Router {
        router(state)
            .layer(TraceLayer::new_for_http())
            .layer(self.cors())
    }

    /// Startet den REST-Server und laeuft bis `shutdown` fertig ist
    pub async fn starten<R, F>(self, state: AppState<R>, shutdown: F) -> Result<()>
    where
        R: KontoRepository + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.app(state);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("REST-Server beendet");
        Ok(())
    }
}

/// GET /health – Health-Check-Endpunkt
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

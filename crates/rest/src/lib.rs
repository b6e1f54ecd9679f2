//! konto-rest – REST-Schnittstelle des Konto-Service
//!
//! Die Handler parsen nur Eingaben, rufen den KontoService und bilden
//! dessen Ergebnis auf HTTP ab. Geschaeftsregeln liegen ausschliesslich im
//! Service.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

use std::sync::Arc;

use konto_auth::KontoService;
use konto_db::KontoRepository;

/// Axum-State fuer den REST-Server
pub struct AppState<R: KontoRepository> {
    pub service: Arc<KontoService<R>>,
}

impl<R: KontoRepository> AppState<R> {
    pub fn neu(service: Arc<KontoService<R>>) -> Self {
        Self { service }
    }
}

// Manuell, damit R selbst nicht Clone sein muss
impl<R: KontoRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

pub use routes::router;
pub use server::{RestServer, RestServerKonfig};

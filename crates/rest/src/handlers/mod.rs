//! REST-Handler

pub mod auth;
pub mod user;

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Response};

use crate::middleware::fehler_antwort;

/// Antwort fuer einen nicht lesbaren JSON-Body
pub(crate) fn body_ungueltig(fehler: JsonRejection) -> Response {
    tracing::debug!(fehler = %fehler, "Request-Body nicht lesbar");
    fehler_antwort(StatusCode::UNPROCESSABLE_ENTITY, "Ungueltiger Request-Body")
}

//! Hilfsfunktionen fuer Auth-Header und Fehlerantworten

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use konto_auth::AuthError;
use serde_json::json;

/// Fehlerantwort fuer die REST-API, immer mit `msg`
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "msg": nachricht }))).into_response()
}

/// Extrahiert Bearer-Token aus Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

/// Antwort fuer fehlenden Authorization-Header
pub fn token_fehlt() -> Response {
    fehler_antwort(StatusCode::UNAUTHORIZED, "Token fehlt")
}

/// HTTP-Status fuer einen Service-Fehler
pub fn status_fuer(fehler: &AuthError) -> StatusCode {
    match fehler {
        AuthError::Validierung(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::EmailVergeben => StatusCode::CONFLICT,
        AuthError::NichtGefunden => StatusCode::NOT_FOUND,
        AuthError::NichtAuthentifiziert
        | AuthError::Verboten
        | AuthError::UngueltigeAnmeldedaten => StatusCode::FORBIDDEN,
        AuthError::SpeicherNichtVerfuegbar
        | AuthError::PasswortHashing
        | AuthError::TokenAusstellung
        | AuthError::Konfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Bildet einen Service-Fehler auf eine Antwort ab
///
/// Serverseitige Fehler bekommen nur eine generische Nachricht.
pub fn service_fehler(fehler: AuthError) -> Response {
    let status = status_fuer(&fehler);
    if fehler.ist_infrastruktur() {
        return fehler_antwort(status, "Interner Serverfehler, bitte spaeter erneut versuchen");
    }
    fehler_antwort(status, &fehler.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extrahieren() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_static("Bearer mein_token_123"),
        );
        assert_eq!(bearer_token(&headers), Some("mein_token_123"));
    }

    #[test]
    fn bearer_token_fehlt() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn anderes_schema_zaehlt_als_fehlend() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn status_abbildung() {
        assert_eq!(
            status_fuer(&AuthError::validierung("x")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_fuer(&AuthError::EmailVergeben), StatusCode::CONFLICT);
        assert_eq!(status_fuer(&AuthError::NichtGefunden), StatusCode::NOT_FOUND);
        assert_eq!(
            status_fuer(&AuthError::NichtAuthentifiziert),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_fuer(&AuthError::Verboten), StatusCode::FORBIDDEN);
        assert_eq!(
            status_fuer(&AuthError::UngueltigeAnmeldedaten),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_fuer(&AuthError::SpeicherNichtVerfuegbar),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    async fn body_text(antwort: Response) -> String {
        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn infrastruktur_fehler_ohne_details() {
        for fehler in [
            AuthError::SpeicherNichtVerfuegbar,
            AuthError::PasswortHashing,
            AuthError::TokenAusstellung,
            AuthError::Konfiguration("geheimer Pfad /etc/konto".into()),
        ] {
            let intern = fehler.to_string();
            let antwort = service_fehler(fehler);
            assert_eq!(antwort.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = body_text(antwort).await;
            assert!(body.contains("Interner Serverfehler"));
            assert!(!body.contains(&intern));
        }
    }

    #[tokio::test]
    async fn fachliche_fehler_mit_nachricht() {
        let antwort = service_fehler(AuthError::validierung("Name fehlt"));
        assert_eq!(antwort.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(antwort).await.contains("Name fehlt"));
    }
}

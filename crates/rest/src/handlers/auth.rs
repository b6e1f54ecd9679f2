//! REST-Handler fuer Registrierung und Login

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use konto_auth::AuthError;
use konto_db::KontoRepository;
use serde::Deserialize;
use serde_json::json;

use crate::handlers::body_ungueltig;
use crate::middleware::{fehler_antwort, service_fehler};
use crate::AppState;

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirmpassword: String,
}

impl std::fmt::Debug for RegisterBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterBody")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<verborgen>")
            .field("confirmpassword", &"<verborgen>")
            .finish()
    }
}

/// POST /auth/register
pub async fn register<R: KontoRepository + 'static>(
    State(state): State<AppState<R>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return body_ungueltig(e),
    };

    match state
        .service
        .registrieren(&body.name, &body.email, &body.password, &body.confirmpassword)
        .await
    {
        Ok(id) => (
            StatusCode::CREATED,
            Json(json!({ "msg": "Konto angelegt", "accountId": id })),
        )
            .into_response(),
        Err(e) => service_fehler(e),
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginBody")
            .field("email", &self.email)
            .field("password", &"<verborgen>")
            .finish()
    }
}

/// POST /auth/login
pub async fn login<R: KontoRepository + 'static>(
    State(state): State<AppState<R>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return body_ungueltig(e),
    };

    match state.service.anmelden(&body.email, &body.password).await {
        Ok(anmeldung) => (
            StatusCode::OK,
            Json(json!({
                "msg": "Anmeldung erfolgreich",
                "token": anmeldung.token,
                "accountId": anmeldung.account_id,
            })),
        )
            .into_response(),
        // Falsches Login-Passwort ist ein Eingabefehler, kein Zugriffsfehler
        Err(AuthError::UngueltigeAnmeldedaten) => fehler_antwort(
            StatusCode::UNPROCESSABLE_ENTITY,
            &AuthError::UngueltigeAnmeldedaten.to_string(),
        ),
        Err(e) => service_fehler(e),
    }
}

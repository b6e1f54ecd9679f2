//! REST-Handler fuer Profil, Aenderung und Loeschung

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use konto_auth::ProfilAenderung;
use konto_core::KontoId;
use konto_db::KontoRepository;
use serde::Deserialize;
use serde_json::json;

use crate::handlers::body_ungueltig;
use crate::middleware::{bearer_token, fehler_antwort, service_fehler, token_fehlt};
use crate::AppState;

fn id_ungueltig(fehler: PathRejection) -> Response {
    tracing::debug!(fehler = %fehler, "Konto-ID im Pfad nicht lesbar");
    fehler_antwort(StatusCode::UNPROCESSABLE_ENTITY, "Ungueltige Konto-ID")
}

/// GET /user/:id
pub async fn get_user<R: KontoRepository + 'static>(
    State(state): State<AppState<R>>,
    id: Result<Path<KontoId>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return token_fehlt();
    };
    let Path(id) = match id {
        Ok(p) => p,
        Err(e) => return id_ungueltig(e),
    };

    match state.service.profil_laden(id, token).await {
        Ok(profil) => (StatusCode::OK, Json(json!({ "account": profil }))).into_response(),
        Err(e) => service_fehler(e),
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct UpdateBody {
    pub name: Option<String>,
    pub password: Option<String>,
    pub confirmpassword: Option<String>,
    #[serde(rename = "currentPassword")]
    pub current_password: String,
}

impl std::fmt::Debug for UpdateBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verborgen = |wert: &Option<String>| wert.as_ref().map(|_| "<verborgen>");
        f.debug_struct("UpdateBody")
            .field("name", &self.name)
            .field("password", &verborgen(&self.password))
            .field("confirmpassword", &verborgen(&self.confirmpassword))
            .field("current_password", &"<verborgen>")
            .finish()
    }
}

/// PUT /user/update/:id
pub async fn update_user<R: KontoRepository + 'static>(
    State(state): State<AppState<R>>,
    id: Result<Path<KontoId>, PathRejection>,
    headers: HeaderMap,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return token_fehlt();
    };
    let Path(id) = match id {
        Ok(p) => p,
        Err(e) => return id_ungueltig(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return body_ungueltig(e),
    };

    let aenderung = ProfilAenderung {
        aktuelles_passwort: &body.current_password,
        name: body.name.as_deref(),
        neues_passwort: body.password.as_deref(),
        passwort_bestaetigung: body.confirmpassword.as_deref(),
    };

    match state.service.profil_aktualisieren(id, token, aenderung).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "msg": "Konto aktualisiert" }))).into_response(),
        Err(e) => service_fehler(e),
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct DeleteBody {
    pub password: String,
}

impl std::fmt::Debug for DeleteBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteBody")
            .field("password", &"<verborgen>")
            .finish()
    }
}

/// DELETE /user/delete/:id
pub async fn delete_user<R: KontoRepository + 'static>(
    State(state): State<AppState<R>>,
    id: Result<Path<KontoId>, PathRejection>,
    headers: HeaderMap,
    body: Result<Json<DeleteBody>, JsonRejection>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return token_fehlt();
    };
    let Path(id) = match id {
        Ok(p) => p,
        Err(e) => return id_ungueltig(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return body_ungueltig(e),
    };

    match state.service.konto_loeschen(id, token, &body.password).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "msg": "Konto geloescht" }))).into_response(),
        Err(e) => service_fehler(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwoerter_nicht_im_debug() {
        let update: UpdateBody = serde_json::from_str(
            r#"{"name":"Anna","password":"neu_geheim","confirmpassword":"neu_geheim","currentPassword":"alt_geheim"}"#,
        )
        .unwrap();
        let ausgabe = format!("{update:?}");
        assert!(ausgabe.contains("Anna"));
        assert!(!ausgabe.contains("neu_geheim"));
        assert!(!ausgabe.contains("alt_geheim"));

        let delete: DeleteBody = serde_json::from_str(r#"{"password":"geheim"}"#).unwrap();
        assert!(!format!("{delete:?}").contains("geheim"));
    }

    #[test]
    fn fehlende_felder_sind_leer() {
        let update: UpdateBody = serde_json::from_str("{}").unwrap();
        assert!(update.name.is_none());
        assert!(update.current_password.is_empty());
    }
}

//! HTTP-Tests gegen den Router mit In-Memory-SQLite

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use konto_auth::{HashKonfig, KontoService, PasswortHasher, TokenService, STANDARD_LEBENSDAUER};
use konto_db::SqliteDb;
use konto_rest::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> (Router, Arc<SqliteDb>) {
    let db = Arc::new(SqliteDb::in_memory().await.expect("DB fehlgeschlagen"));
    let hasher = PasswortHasher::neu(HashKonfig {
        speicher_kib: 256,
        iterationen: 1,
        parallelismus: 1,
    })
    .unwrap();
    let tokens =
        Arc::new(TokenService::neu(b"http_test_schluessel", STANDARD_LEBENSDAUER).unwrap());
    let service = Arc::new(KontoService::neu(Arc::clone(&db), hasher, tokens));
    (router(AppState::neu(service)), db)
}

async fn senden(
    app: &Router,
    methode: Method,
    pfad: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(methode).uri(pfad);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let antwort = app.clone().oneshot(request).await.unwrap();
    let status = antwort.status();
    let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn registrieren(app: &Router, name: &str, email: &str, passwort: &str) -> i64 {
    let (status, body) = senden(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": passwort,
            "confirmpassword": passwort,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["accountId"].as_i64().unwrap()
}

async fn anmelden(app: &Router, email: &str, passwort: &str) -> String {
    let (status, body) = senden(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": passwort })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_ohne_token() {
    let (app, _) = test_app().await;
    let (status, body) = senden(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn ana_registrieren_anmelden_falsches_aktuelles_passwort() {
    let (app, _) = test_app().await;

    let id = registrieren(&app, "Ana", "ana@x.com", "p1").await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "ana@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountId"], id);
    assert!(body["msg"].is_string());
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let (status, body) = senden(
        &app,
        Method::PUT,
        &format!("/user/update/{id}"),
        Some(token),
        Some(json!({ "name": "Mallory", "currentPassword": "falsch" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["msg"].is_string());

    // Name unveraendert
    let (_, body) = senden(&app, Method::GET, &format!("/user/{id}"), Some(token), None).await;
    assert_eq!(body["account"]["name"], "Ana");
}

#[tokio::test]
async fn profil_abrufen_ohne_hash() {
    let (app, _) = test_app().await;
    let id = registrieren(&app, "Ana", "ana@x.com", "p1").await;
    let token = anmelden(&app, "ana@x.com", "p1").await;

    let (status, body) =
        senden(&app, Method::GET, &format!("/user/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "account": { "id": id, "name": "Ana", "email": "ana@x.com", "adminLevel": 0 } })
    );
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn token_fehlt_ergibt_401_ungueltig_403() {
    let (app, _) = test_app().await;
    let id = registrieren(&app, "Ana", "ana@x.com", "p1").await;

    let (status, body) = senden(&app, Method::GET, &format!("/user/{id}"), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["msg"].is_string());

    let (status, _) = senden(
        &app,
        Method::GET,
        &format!("/user/{id}"),
        Some("kein.gueltiges.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn registrierung_fehlerfaelle() {
    let (app, _) = test_app().await;

    // Passwoerter ungleich
    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "p1",
            "confirmpassword": "p2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["msg"].is_string());

    // Fehlende Felder zaehlen als leer
    let (status, _) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "ana@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Doppelte E-Mail
    registrieren(&app, "Ana", "ana@x.com", "p1").await;
    let (status, _) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana 2",
            "email": "ana@x.com",
            "password": "p9",
            "confirmpassword": "p9",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_fehlerfaelle() {
    let (app, _) = test_app().await;
    registrieren(&app, "Ana", "ana@x.com", "p1").await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "ana@x.com", "password": "falsch" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.get("token").is_none());

    let (status, _) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "niemand@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn kaputter_body_ergibt_422() {
    let (app, _) = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{kein json"))
        .unwrap();
    let antwort = app.oneshot(request).await.unwrap();
    assert_eq!(antwort.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unbekanntes_konto_und_ungueltige_id() {
    let (app, _) = test_app().await;
    registrieren(&app, "Ana", "ana@x.com", "p1").await;
    let token = anmelden(&app, "ana@x.com", "p1").await;

    let (status, _) = senden(&app, Method::GET, "/user/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = senden(&app, Method::GET, "/user/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn passwort_aendern_ueber_http() {
    let (app, _) = test_app().await;
    let id = registrieren(&app, "Ana", "ana@x.com", "p1").await;
    let token = anmelden(&app, "ana@x.com", "p1").await;

    let (status, _) = senden(
        &app,
        Method::PUT,
        &format!("/user/update/{id}"),
        Some(&token),
        Some(json!({
            "password": "p2",
            "confirmpassword": "p2",
            "currentPassword": "p1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    anmelden(&app, "ana@x.com", "p2").await;
}

#[tokio::test]
async fn loeschen_eigenes_und_fremdes_konto() {
    let (app, db) = test_app().await;
    let id_a = registrieren(&app, "A", "a@x.com", "pw_a").await;
    let id_b = registrieren(&app, "B", "b@x.com", "pw_b").await;
    let token_a = anmelden(&app, "a@x.com", "pw_a").await;

    // Fremdes Konto ohne Admin-Rechte
    let (status, _) = senden(
        &app,
        Method::DELETE,
        &format!("/user/delete/{id_b}"),
        Some(&token_a),
        Some(json!({ "password": "pw_b" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Mit Super-Admin-Rechten
    sqlx::query("UPDATE users SET admin_level = 2 WHERE id = ?")
        .bind(id_a)
        .execute(db.pool())
        .await
        .unwrap();
    let (status, body) = senden(
        &app,
        Method::DELETE,
        &format!("/user/delete/{id_b}"),
        Some(&token_a),
        Some(json!({ "password": "pw_b" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["msg"].is_string());

    // Eigenes Konto, falsches Passwort
    let (status, _) = senden(
        &app,
        Method::DELETE,
        &format!("/user/delete/{id_a}"),
        Some(&token_a),
        Some(json!({ "password": "falsch" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = senden(
        &app,
        Method::DELETE,
        &format!("/user/delete/{id_a}"),
        Some(&token_a),
        Some(json!({ "password": "pw_a" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        senden(&app, Method::GET, &format!("/user/{id_a}"), Some(&token_a), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

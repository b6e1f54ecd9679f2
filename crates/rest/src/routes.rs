//! Route-Definitionen fuer die REST-API

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use konto_db::KontoRepository;

use crate::{handlers, server::health, AppState};

/// Erstellt den vollstaendigen Router inklusive State
pub fn router<R: KontoRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        // Oeffentlich
        .route("/health", get(health))
        .route("/auth/register", post(handlers::auth::register::<R>))
        .route("/auth/login", post(handlers::auth::login::<R>))
        // Token erforderlich
        .route("/user/:id", get(handlers::user::get_user::<R>))
        .route("/user/update/:id", put(handlers::user::update_user::<R>))
        .route("/user/delete/:id", delete(handlers::user::delete_user::<R>))
        .with_state(state)
}

use axum::{routing::get, Router};

pub mod home;
pub mod suppliers;
pub mod system;

/// Router for every page (handlers read `AppServices` from an `Extension`).
pub fn router() -> Router {
    Router::new()
        .route("/", get(home::show_home))
        .route("/health", get(system::health))
        .merge(suppliers::router())
}

//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository selection and the shared service handle
//! - `routes/`: HTTP routes + handlers
//! - `forms.rs`: form bodies and their mapping to domain input
//! - `views.rs`: server-rendered HTML pages
//! - `errors.rs`: error pages and user-facing form messages

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;

pub mod errors;
pub mod forms;
pub mod routes;
pub mod services;
pub mod views;

pub use services::AppServices;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router(services))
}

/// Build the router around already constructed services.
pub fn router(services: AppServices) -> Router {
    routes::router()
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                )
                .layer(Extension(Arc::new(services))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn every_request_is_logged_with_path_and_status() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let res = router(AppServices::in_memory())
            .oneshot(Request::builder().uri("/suppliers/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("finished processing request"), "{logs}");
        assert!(logs.contains("uri=/suppliers/"), "{logs}");
        assert!(logs.contains("status=200"), "{logs}");
    }
}

// src/server.rs

//! Liveness endpoint.
//!
//! A single `GET /` route that answers while the process is up. It shares no
//! state with the poll loop.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;

use crate::error::{AppError, Result};

/// Text returned by `GET /`.
pub const ALIVE_MESSAGE: &str = "Web Monitor is running. Check the logs for monitoring updates.";

/// Build the liveness router.
pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> &'static str {
    ALIVE_MESSAGE
}

/// Serve the liveness router on `bind` until the process exits.
pub async fn serve(bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| AppError::config(format!("Invalid bind address '{bind}': {e}")))?;
    let listener = TcpListener::bind(addr).await?;
    log::info!("Starting liveness server on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_root_reports_alive() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), ALIVE_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn test_other_routes_not_found() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_root_not_allowed() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_address() {
        assert!(serve("not-an-address").await.is_err());
    }
}

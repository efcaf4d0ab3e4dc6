//! axum adapter: every request goes through one fallback handler that hands
//! method, path and body to the pantry router.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use pantry_core::domain::RequestId;
use pantry_core::http::{ApiResponse, Router as PantryRouter};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn app(router: PantryRouter) -> axum::Router {
    axum::Router::new().fallback(dispatch).with_state(router)
}

async fn dispatch(
    State(router): State<PantryRouter>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let method = pantry_core::http::Method::from(method.as_str());
    let (request_id, response) = router.handle(&method, uri.path(), &body).await;
    into_response(request_id, response)
}

fn into_response(request_id: RequestId, api: ApiResponse) -> Response {
    let status = StatusCode::from_u16(api.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (
        status,
        [(header::CONTENT_TYPE, api.content_type.as_str())],
        api.body,
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}

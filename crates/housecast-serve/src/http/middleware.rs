//! Request logging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log method and URI on the way in and the status on the way out.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::info!(%method, %uri, "incoming request");

    let response = next.run(request).await;

    tracing::info!(%method, %uri, status = response.status().as_u16(), "response sent");
    response
}

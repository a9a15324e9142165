use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;

/// Authentication gate: verifies the bearer token and attaches the
/// resulting [`Identity`](crate::auth::Identity) to the request.
///
/// Rejected requests never reach a handler and never touch storage.
pub async fn authentication_gate(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = auth::verify_bearer(header)?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

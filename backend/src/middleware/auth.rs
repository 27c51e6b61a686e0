use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState, utils::jwt::verify_access_token};

/// Header accepted in place of `Authorization` by older clients.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Verifies the caller's token and attaches the resulting `Actor`.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".into()))?;

    let claims = verify_access_token(&token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Token is not valid".into()))?;
    let actor = claims.actor().map_err(|err| {
        tracing::debug!(error = %err, "rejecting token with unusable claims");
        AppError::Unauthorized("Token is not valid".into())
    })?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        let token = rest.trim();
        return (!token.is_empty()).then_some(token);
    }
    None
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .or_else(|| {
            headers
                .get(AUTH_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
        .map(str::to_owned)
}

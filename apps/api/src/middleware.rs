use axum::extract::{Extension, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tourdesk_core::AppError;
use tourdesk_domain::{Principal, RequiredAccess};

use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the bearer token into a principal stored in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(&request)
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let principal = state.authentication_service.authenticate(&token).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Admits the request only when the principal satisfies the route requirement.
///
/// The requirement is attached to the route as an `Extension<RequiredAccess>`.
pub async fn require_access(
    State(state): State<AppState>,
    Extension(access): Extension<RequiredAccess>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = request.extensions().get::<Principal>().cloned();
    state
        .authorization_service
        .authorize(principal.as_ref(), &access)
        .await?;

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

use axum::Json;
use axum::extract::{Extension, State};
use tourdesk_domain::Principal;

use crate::dto::{EffectivePermissionsResponse, UserAccountResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<UserAccountResponse>> {
    let account = state.user_service.get(principal.user_id()).await?;

    Ok(Json(UserAccountResponse::from(account)))
}

pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let permissions = state
        .authorization_service
        .resolve(principal.role())
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(permissions)))
}

use axum::Json;
use axum::extract::State;
use tourdesk_core::AppResult;
use tourdesk_domain::{PermissionName, UserId};

use crate::dto::{AccessCheckRequest, AccessCheckResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn access_check_handler(
    State(state): State<AppState>,
    Json(payload): Json<AccessCheckRequest>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let account = state.user_service.get(&UserId::new(payload.user_id)?).await?;
    let permissions = payload
        .permissions
        .into_iter()
        .map(PermissionName::new)
        .collect::<AppResult<Vec<_>>>()?;

    let effective = state.authorization_service.resolve(&account.role).await?;
    let missing = permissions
        .iter()
        .filter(|permission| !effective.contains(permission))
        .map(|permission| permission.as_str().to_owned())
        .collect();

    Ok(Json(AccessCheckResponse {
        user_id: account.id.as_str().to_owned(),
        role: account.role.as_str().to_owned(),
        granted_any: effective.contains_any(&permissions),
        granted_all: effective.contains_all(&permissions),
        missing,
    }))
}

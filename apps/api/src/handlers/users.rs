use axum::Json;
use axum::extract::{Path, State};
use tourdesk_domain::{RoleName, UserId, UserStatus};

use crate::dto::{ChangeUserRoleRequest, ChangeUserStatusRequest, UserAccountResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserAccountResponse>>> {
    let users = state
        .user_service
        .list()
        .await?
        .into_iter()
        .map(UserAccountResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserAccountResponse>> {
    let account = state.user_service.get(&UserId::new(user_id)?).await?;

    Ok(Json(UserAccountResponse::from(account)))
}

pub async fn change_user_role_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ChangeUserRoleRequest>,
) -> ApiResult<Json<UserAccountResponse>> {
    let account = state
        .user_service
        .change_role(&UserId::new(user_id)?, &RoleName::new(payload.role)?)
        .await?;

    Ok(Json(UserAccountResponse::from(account)))
}

pub async fn change_user_status_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ChangeUserStatusRequest>,
) -> ApiResult<Json<UserAccountResponse>> {
    let status = payload.status.parse::<UserStatus>()?;
    let account = state
        .user_service
        .change_status(&UserId::new(user_id)?, status)
        .await?;

    Ok(Json(UserAccountResponse::from(account)))
}

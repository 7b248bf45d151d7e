use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tourdesk_application::{CreatePermissionInput, UpdatePermissionInput};
use tourdesk_domain::{PermissionId, PermissionName};

use crate::dto::{CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .permission_registry
        .list()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let permission = state
        .permission_registry
        .create(CreatePermissionInput {
            name: PermissionName::new(payload.name)?,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionResponse::from(permission))))
}

pub async fn get_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .permission_registry
        .get_by_id(PermissionId::parse(permission_id.as_str())?)
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn update_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
    Json(payload): Json<UpdatePermissionRequest>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .permission_registry
        .update(
            PermissionId::parse(permission_id.as_str())?,
            UpdatePermissionInput {
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .permission_registry
        .delete(PermissionId::parse(permission_id.as_str())?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_resource_permissions_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .permission_registry
        .find_by_resource(resource.as_str())
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

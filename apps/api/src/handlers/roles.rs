use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tourdesk_application::{CreateRoleInput, RolePatch};
use tourdesk_core::AppResult;
use tourdesk_domain::{PermissionName, RoleId, RoleName};

use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_registry
        .list()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .role_registry
        .create(CreateRoleInput {
            name: RoleName::new(payload.name)?,
            display_name: payload.display_name,
            description: payload.description,
            is_system: false,
            permissions: parse_permission_names(payload.permissions)?,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_registry
        .get_by_id(RoleId::parse(role_id.as_str())?)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let patch = RolePatch {
        name: payload.name.map(RoleName::new).transpose()?,
        display_name: payload.display_name,
        description: payload.description,
        permissions: payload
            .permissions
            .map(parse_permission_names)
            .transpose()?,
    };

    let role = state
        .role_registry
        .update(RoleId::parse(role_id.as_str())?, patch)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .role_registry
        .delete(RoleId::parse(role_id.as_str())?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_permission_names(values: Vec<String>) -> AppResult<Vec<PermissionName>> {
    values.into_iter().map(PermissionName::new).collect()
}

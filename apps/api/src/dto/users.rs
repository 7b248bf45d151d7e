use serde::{Deserialize, Serialize};
use tourdesk_domain::{EffectivePermissions, UserAccount};
use ts_rs::TS;

use super::PermissionResponse;

/// API representation of a user account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-account-response.ts"
)]
pub struct UserAccountResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserAccount> for UserAccountResponse {
    fn from(value: UserAccount) -> Self {
        Self {
            user_id: value.id.as_str().to_owned(),
            email: value.email,
            display_name: value.display_name,
            role: value.role.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for role assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/change-user-role-request.ts"
)]
pub struct ChangeUserRoleRequest {
    pub role: String,
}

/// Incoming payload for account status changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/change-user-status-request.ts"
)]
pub struct ChangeUserStatusRequest {
    pub status: String,
}

/// Effective permissions of the caller's role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub role: Option<String>,
    /// Every name the role lists, including names without a registered record.
    pub names: Vec<String>,
    /// Registered permission records only.
    pub permissions: Vec<PermissionResponse>,
}

impl From<EffectivePermissions> for EffectivePermissionsResponse {
    fn from(value: EffectivePermissions) -> Self {
        let mut permissions = value
            .records()
            .iter()
            .cloned()
            .map(PermissionResponse::from)
            .collect::<Vec<_>>();
        permissions.sort_by(|left, right| left.name.cmp(&right.name));

        Self {
            role: value.role().map(|role| role.name().as_str().to_owned()),
            names: value
                .names()
                .map(|name| name.as_str().to_owned())
                .collect(),
            permissions,
        }
    }
}

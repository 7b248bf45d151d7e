mod common;
mod permissions;
mod roles;
mod users;

pub use common::{AccessCheckRequest, AccessCheckResponse, HealthResponse};
pub use permissions::{CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest};
pub use roles::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
pub use users::{
    ChangeUserRoleRequest, ChangeUserStatusRequest, EffectivePermissionsResponse,
    UserAccountResponse,
};

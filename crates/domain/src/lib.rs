//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod catalog;
mod permission;
mod role;
mod security;
mod user;

pub use catalog::{
    ADMIN_ROLE, BUILTIN_PERMISSIONS, DEFAULT_ROLE, PermissionSeed, RoleSeed, builtin_permissions,
    builtin_roles,
};
pub use permission::{Permission, PermissionId, PermissionName};
pub use role::{Role, RoleId, RoleName, StoredRole};
pub use security::{EffectivePermissions, RequiredAccess};
pub use user::{Principal, UserAccount, UserId, UserStatus};

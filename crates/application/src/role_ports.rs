use async_trait::async_trait;

use tourdesk_core::AppResult;
use tourdesk_domain::{PermissionName, Role, RoleId, RoleName};

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name.
    pub name: RoleName,
    /// Human-friendly name.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Marks the role as system-managed.
    pub is_system: bool,
    /// Permission names granted by the role.
    pub permissions: Vec<PermissionName>,
}

/// Partial role update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    /// New unique name.
    pub name: Option<RoleName>,
    /// New display name.
    pub display_name: Option<String>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
    /// Full replacement of the permission set.
    pub permissions: Option<Vec<PermissionName>>,
}

/// Outcome of an idempotent seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Records created because their name was absent.
    pub created: usize,
    /// Records overwritten to match the seed definition.
    pub updated: usize,
}

/// Repository port for the role document collection.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Inserts a new role document.
    async fn insert(&self, role: Role) -> AppResult<()>;

    /// Finds a role by generated identifier.
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>>;

    /// Finds a role by unique name.
    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>>;

    /// Lists all roles.
    async fn list(&self) -> AppResult<Vec<Role>>;

    /// Overwrites an existing role document (last writer wins).
    async fn save(&self, role: Role) -> AppResult<()>;

    /// Deletes a role document, returning whether it existed.
    async fn delete(&self, id: RoleId) -> AppResult<bool>;
}

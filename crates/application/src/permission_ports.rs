use async_trait::async_trait;

use tourdesk_core::AppResult;
use tourdesk_domain::{Permission, PermissionId, PermissionName};

/// Input payload for registering a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Unique `resource:action` name.
    pub name: PermissionName,
    /// Optional description.
    pub description: Option<String>,
}

/// Input payload for editing a permission. The name is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePermissionInput {
    /// Replacement description; `None` clears it.
    pub description: Option<String>,
}

/// Repository port for the permission document collection.
///
/// The store is not assumed to enforce name uniqueness.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Maximum number of names one batch lookup accepts.
    fn max_batch_size(&self) -> usize;

    /// Inserts a new permission document.
    async fn insert(&self, permission: Permission) -> AppResult<()>;

    /// Finds a permission by generated identifier.
    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>>;

    /// Finds a permission by unique name.
    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>>;

    /// Finds all permissions whose name is in `names` using one lookup.
    ///
    /// Callers never pass more than [`PermissionRepository::max_batch_size`] names.
    async fn find_by_name_batch(&self, names: &[PermissionName]) -> AppResult<Vec<Permission>>;

    /// Lists all permissions.
    async fn list(&self) -> AppResult<Vec<Permission>>;

    /// Lists permissions of one resource ordered by action.
    async fn list_by_resource(&self, resource: &str) -> AppResult<Vec<Permission>>;

    /// Overwrites an existing permission document.
    async fn save(&self, permission: Permission) -> AppResult<()>;

    /// Deletes a permission document, returning whether it existed.
    async fn delete(&self, id: PermissionId) -> AppResult<bool>;
}

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tourdesk_application::{DEFAULT_PERMISSION_BATCH_SIZE, PermissionRepository};
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{Permission, PermissionId, PermissionName};

/// In-memory permission repository implementation.
///
/// Batch lookups are capped like the hosted document store, so callers must
/// chunk their input.
#[derive(Debug)]
pub struct InMemoryPermissionRepository {
    permissions: RwLock<HashMap<PermissionId, Permission>>,
    max_batch_size: usize,
}

impl InMemoryPermissionRepository {
    /// Creates an empty repository with the default batch cap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_batch_size(DEFAULT_PERMISSION_BATCH_SIZE)
    }

    /// Creates an empty repository with a custom batch cap.
    #[must_use]
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            permissions: RwLock::new(HashMap::new()),
            max_batch_size: max_batch_size.max(1),
        }
    }
}

impl Default for InMemoryPermissionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    async fn insert(&self, permission: Permission) -> AppResult<()> {
        let mut permissions = self.permissions.write().await;

        if permissions
            .values()
            .any(|stored| stored.name() == permission.name())
        {
            return Err(AppError::Conflict(format!(
                "permission '{}' already exists",
                permission.name()
            )));
        }

        permissions.insert(permission.id(), permission);
        Ok(())
    }

    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>> {
        Ok(self.permissions.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>> {
        Ok(self
            .permissions
            .read()
            .await
            .values()
            .find(|permission| permission.name() == name)
            .cloned())
    }

    async fn find_by_name_batch(&self, names: &[PermissionName]) -> AppResult<Vec<Permission>> {
        if names.len() > self.max_batch_size {
            return Err(AppError::Internal(format!(
                "batch lookup of {} names exceeds the limit of {}",
                names.len(),
                self.max_batch_size
            )));
        }

        Ok(self
            .permissions
            .read()
            .await
            .values()
            .filter(|permission| names.contains(permission.name()))
            .cloned()
            .collect())
    }

    async fn list(&self) -> AppResult<Vec<Permission>> {
        Ok(self.permissions.read().await.values().cloned().collect())
    }

    async fn list_by_resource(&self, resource: &str) -> AppResult<Vec<Permission>> {
        Ok(self
            .permissions
            .read()
            .await
            .values()
            .filter(|permission| permission.resource() == resource)
            .cloned()
            .collect())
    }

    async fn save(&self, permission: Permission) -> AppResult<()> {
        let mut permissions = self.permissions.write().await;
        let Some(stored) = permissions.get_mut(&permission.id()) else {
            return Err(AppError::NotFound(format!(
                "permission '{}' was not found",
                permission.id()
            )));
        };

        *stored = permission;
        Ok(())
    }

    async fn delete(&self, id: PermissionId) -> AppResult<bool> {
        Ok(self.permissions.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use tourdesk_application::{CreatePermissionInput, PermissionRegistry, PermissionRepository};
    use tourdesk_core::AppError;
    use tourdesk_domain::{Permission, PermissionName};

    use super::InMemoryPermissionRepository;

    fn name(value: &str) -> PermissionName {
        PermissionName::new(value).unwrap_or_else(|error| panic!("invalid fixture: {error}"))
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_names() {
        let repository = InMemoryPermissionRepository::new();
        let first = repository
            .insert(Permission::new(name("tour:view"), None, Utc::now()))
            .await;
        let second = repository
            .insert(Permission::new(name("tour:view"), None, Utc::now()))
            .await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let repository = InMemoryPermissionRepository::with_max_batch_size(2);
        let names = vec![name("tour:view"), name("tour:create"), name("tour:delete")];

        let result = repository.find_by_name_batch(&names).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn registry_resolves_more_names_than_the_cap() {
        let registry = PermissionRegistry::new(Arc::new(InMemoryPermissionRepository::new()));
        let mut names = Vec::new();
        for index in 0..25 {
            let permission_name = name(&format!("booking:step{index}"));
            registry
                .create(CreatePermissionInput {
                    name: permission_name.clone(),
                    description: None,
                })
                .await
                .unwrap_or_else(|error| panic!("create failed: {error}"));
            names.push(permission_name);
        }

        let resolved = registry
            .find_by_names(&names)
            .await
            .unwrap_or_else(|error| panic!("lookup failed: {error}"));

        assert_eq!(resolved.len(), 25);
    }

    #[tokio::test]
    async fn save_of_unknown_permission_is_not_found() {
        let repository = InMemoryPermissionRepository::new();

        let result = repository
            .save(Permission::new(name("tour:view"), None, Utc::now()))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

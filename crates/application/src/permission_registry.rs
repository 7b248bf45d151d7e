use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{Permission, PermissionId, PermissionName};

use crate::{CreatePermissionInput, PermissionRepository, UpdatePermissionInput};


/// Names per batch lookup when nothing smaller is configured.
pub const DEFAULT_PERMISSION_BATCH_SIZE: usize = 10;

/// Application service owning the permission registry.
#[derive(Clone)]
pub struct PermissionRegistry {
    repository: Arc<dyn PermissionRepository>,
    batch_size: usize,
}

impl PermissionRegistry {
    /// Creates a registry over a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self {
            repository,
            batch_size: DEFAULT_PERMISSION_BATCH_SIZE,
        }
    }

    /// Overrides the number of names sent per batch lookup.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Registers a new permission.
    pub async fn create(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "permission '{}' already exists",
                input.name
            )));
        }

        let permission = Permission::new(input.name, input.description, Utc::now());
        self.repository.insert(permission.clone()).await?;

        info!(permission = %permission.name(), "permission created");
        Ok(permission)
    }

    /// Finds a permission by name.
    pub async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>> {
        self.repository.find_by_name(name).await
    }

    /// Returns a permission by name or a not-found error.
    pub async fn get_by_name(&self, name: &PermissionName) -> AppResult<Permission> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("permission '{name}' was not found")))
    }

    /// Finds a permission by identifier.
    pub async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>> {
        self.repository.find_by_id(id).await
    }

    /// Returns a permission by identifier or a not-found error.
    pub async fn get_by_id(&self, id: PermissionId) -> AppResult<Permission> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("permission '{id}' was not found")))
    }

    /// Returns every registered permission whose name is in `names`.
    ///
    /// Names are looked up in chunks no larger than the store's batch cap.
    /// Missing names are skipped, result order is unspecified, and a failed
    /// chunk fails the whole call.
    pub async fn find_by_names(&self, names: &[PermissionName]) -> AppResult<Vec<Permission>> {
        let mut seen = HashSet::new();
        let unique = names
            .iter()
            .filter(|name| seen.insert(*name))
            .cloned()
            .collect::<Vec<_>>();

        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = self.chunk_size();
        let mut permissions = Vec::with_capacity(unique.len());
        for chunk in chunked(&unique, chunk_size) {
            debug!(chunk_len = chunk.len(), chunk_size, "resolving permission chunk");
            permissions.extend(self.repository.find_by_name_batch(chunk).await?);
        }

        Ok(permissions)
    }

    /// Lists permissions of one resource ordered by action.
    pub async fn find_by_resource(&self, resource: &str) -> AppResult<Vec<Permission>> {
        let mut permissions = self.repository.list_by_resource(resource).await?;
        permissions.sort_by(|left, right| left.action().cmp(right.action()));
        Ok(permissions)
    }

    /// Lists all permissions ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Permission>> {
        let mut permissions = self.repository.list().await?;
        permissions.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(permissions)
    }

    /// Updates the mutable fields of a permission.
    pub async fn update(
        &self,
        id: PermissionId,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        let mut permission = self.get_by_id(id).await?;
        permission.set_description(input.description, Utc::now());
        self.repository.save(permission.clone()).await?;

        info!(permission = %permission.name(), "permission updated");
        Ok(permission)
    }

    /// Deletes a permission. Roles still listing its name keep the name.
    pub async fn delete(&self, id: PermissionId) -> AppResult<()> {
        let permission = self.get_by_id(id).await?;
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "permission '{id}' was not found"
            )));
        }

        info!(permission = %permission.name(), "permission deleted");
        Ok(())
    }

    fn chunk_size(&self) -> usize {
        self.batch_size
            .min(self.repository.max_batch_size())
            .max(1)
    }
}

fn chunked(names: &[PermissionName], chunk_size: usize) -> std::slice::Chunks<'_, PermissionName> {
    names.chunks(chunk_size.max(1))
}

//! PostgreSQL-backed permission repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tourdesk_application::PermissionRepository;
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{Permission, PermissionId, PermissionName};

#[cfg(test)]
mod tests;

const MAX_NAMES_PER_QUERY: usize = 500;

/// PostgreSQL implementation of the permission repository port.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PermissionRow {
    id: uuid::Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PermissionRow> for Permission {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        Ok(Permission::from_stored(
            PermissionId::from_uuid(row.id),
            PermissionName::new(row.name)?,
            row.description,
            row.created_at,
            row.updated_at,
        ))
    }
}

fn collect_permissions(rows: Vec<PermissionRow>) -> AppResult<Vec<Permission>> {
    rows.into_iter().map(Permission::try_from).collect()
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    fn max_batch_size(&self) -> usize {
        MAX_NAMES_PER_QUERY
    }

    async fn insert(&self, permission: Permission) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO permissions (id, name, resource, action, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(permission.id().as_uuid())
        .bind(permission.name().as_str())
        .bind(permission.resource())
        .bind(permission.action())
        .bind(permission.description())
        .bind(permission.created_at())
        .bind(permission.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| map_permission_conflict(error, permission.name()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find permission: {error}")))?
        .map(Permission::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find permission: {error}")))?
        .map(Permission::try_from)
        .transpose()
    }

    async fn find_by_name_batch(&self, names: &[PermissionName]) -> AppResult<Vec<Permission>> {
        if names.len() > MAX_NAMES_PER_QUERY {
            return Err(AppError::Internal(format!(
                "batch lookup of {} names exceeds the limit of {MAX_NAMES_PER_QUERY}",
                names.len()
            )));
        }

        let names = names
            .iter()
            .map(|name| name.as_str().to_owned())
            .collect::<Vec<_>>();
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            WHERE name = ANY($1)
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve permissions: {error}")))?;

        collect_permissions(rows)
    }

    async fn list(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        collect_permissions(rows)
    }

    async fn list_by_resource(&self, resource: &str) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM permissions
            WHERE resource = $1
            ORDER BY action
            "#,
        )
        .bind(resource)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        collect_permissions(rows)
    }

    async fn save(&self, permission: Permission) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE permissions
            SET description = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(permission.id().as_uuid())
        .bind(permission.description())
        .bind(permission.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update permission: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "permission '{}' was not found",
                permission.id()
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: PermissionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete permission: {error}"))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_permission_conflict(error: sqlx::Error, name: &PermissionName) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("permission '{name}' already exists"));
    }

    AppError::Internal(format!("failed to create permission: {error}"))
}

//! PostgreSQL-backed role repository.
//!
//! Permission names are stored as a `TEXT[]` column on the role row and are
//! never joined against the permission table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tourdesk_application::RoleRepository;
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{PermissionName, Role, RoleId, RoleName, StoredRole};


/// PostgreSQL implementation of the role repository port.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: uuid::Uuid,
    name: String,
    display_name: String,
    description: Option<String>,
    is_system: bool,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for Role {
    type Error = AppError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        let permissions = row
            .permissions
            .into_iter()
            .map(PermissionName::new)
            .collect::<AppResult<Vec<_>>>()?;

        Role::from_stored(StoredRole {
            id: RoleId::from_uuid(row.id),
            name: RoleName::new(row.name)?,
            display_name: row.display_name,
            description: row.description,
            is_system: row.is_system,
            permissions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn permission_strings(role: &Role) -> Vec<String> {
    role.permissions()
        .iter()
        .map(|permission| permission.as_str().to_owned())
        .collect()
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn insert(&self, role: Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO roles (
                id, name, display_name, description, is_system, permissions, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(role.name().as_str())
        .bind(role.display_name())
        .bind(role.description())
        .bind(role.is_system())
        .bind(permission_strings(&role))
        .bind(role.created_at())
        .bind(role.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, role.name(), "create"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, display_name, description, is_system, permissions, created_at, updated_at
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?
        .map(Role::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, display_name, description, is_system, permissions, created_at, updated_at
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?
        .map(Role::try_from)
        .transpose()
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, display_name, description, is_system, permissions, created_at, updated_at
            FROM roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn save(&self, role: Role) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE roles
            SET name = $2,
                display_name = $3,
                description = $4,
                is_system = $5,
                permissions = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(role.name().as_str())
        .bind(role.display_name())
        .bind(role.description())
        .bind(role.is_system())
        .bind(permission_strings(&role))
        .bind(role.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, role.name(), "update"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "role '{}' was not found",
                role.id()
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete role: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_role_conflict(error: sqlx::Error, role_name: &RoleName, operation: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to {operation} role: {error}"))
}

//! PostgreSQL-backed user account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tourdesk_application::UserRepository;
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{RoleName, UserAccount, UserId, UserStatus};


/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserAccountRow {
    id: String,
    email: Option<String>,
    display_name: Option<String>,
    role_name: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserAccountRow> for UserAccount {
    type Error = AppError;

    fn try_from(row: UserAccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id)?,
            email: row.email,
            display_name: row.display_name,
            role: RoleName::new(row.role_name)?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, email, display_name, role_name, status, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserAccount>> {
        sqlx::query_as::<_, UserAccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM user_accounts WHERE id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user: {error}")))?
        .map(UserAccount::try_from)
        .transpose()
    }

    async fn insert(&self, account: UserAccount) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_accounts (
                id, email, display_name, role_name, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.as_str())
        .bind(account.email.as_deref())
        .bind(account.display_name.as_deref())
        .bind(account.role.as_str())
        .bind(account.status.as_str())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if let sqlx::Error::Database(database_error) = &error
                && database_error.code().as_deref() == Some("23505")
            {
                return AppError::Conflict(format!("user '{}' already exists", account.id));
            }

            AppError::Internal(format!("failed to create user: {error}"))
        })?;

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<UserAccount>> {
        let rows = sqlx::query_as::<_, UserAccountRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM user_accounts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter().map(UserAccount::try_from).collect()
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        role: &RoleName,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>> {
        sqlx::query_as::<_, UserAccountRow>(&format!(
            "UPDATE user_accounts SET role_name = $2, updated_at = $3 WHERE id = $1 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(role.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user role: {error}")))?
        .map(UserAccount::try_from)
        .transpose()
    }

    async fn update_status(
        &self,
        user_id: &UserId,
        status: UserStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>> {
        sqlx::query_as::<_, UserAccountRow>(&format!(
            "UPDATE user_accounts SET status = $2, updated_at = $3 WHERE id = $1 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(status.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user status: {error}")))?
        .map(UserAccount::try_from)
        .transpose()
    }
}

use chrono::Utc;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tourdesk_application::PermissionRepository;
use tourdesk_core::AppError;
use tourdesk_domain::{Permission, PermissionName};
use uuid::Uuid;

use super::PostgresPermissionRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres permission tests: {error}");
    }

    Some(pool)
}

fn unique_name(action: &str) -> PermissionName {
    let resource = format!("test{}", Uuid::new_v4().simple());
    PermissionName::from_parts(&resource, action)
        .unwrap_or_else(|error| panic!("invalid fixture: {error}"))
}

#[tokio::test]
async fn insert_conflicts_on_duplicate_name() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresPermissionRepository::new(pool);
    let name = unique_name("view");

    let first = repository
        .insert(Permission::new(name.clone(), None, Utc::now()))
        .await;
    let second = repository
        .insert(Permission::new(name, None, Utc::now()))
        .await;

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn batch_lookup_returns_only_registered_names() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresPermissionRepository::new(pool);
    let registered = unique_name("view");
    let missing = unique_name("teleport");
    let insert = repository
        .insert(Permission::new(
            registered.clone(),
            Some("View".to_owned()),
            Utc::now(),
        ))
        .await;
    assert!(insert.is_ok());

    let found = repository
        .find_by_name_batch(&[registered.clone(), missing])
        .await
        .unwrap_or_else(|error| panic!("batch lookup failed: {error}"));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), &registered);
    assert_eq!(found[0].description(), Some("View"));
}

#[tokio::test]
async fn list_by_resource_and_delete() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresPermissionRepository::new(pool);
    let view = unique_name("view");
    let update = PermissionName::from_parts(view.resource(), "update")
        .unwrap_or_else(|error| panic!("invalid fixture: {error}"));
    let view_permission = Permission::new(view.clone(), None, Utc::now());
    assert!(repository.insert(view_permission.clone()).await.is_ok());
    assert!(
        repository
            .insert(Permission::new(update, None, Utc::now()))
            .await
            .is_ok()
    );

    let listed = repository
        .list_by_resource(view.resource())
        .await
        .unwrap_or_else(|error| panic!("list failed: {error}"));
    let actions = listed
        .iter()
        .map(|permission| permission.action())
        .collect::<Vec<_>>();
    assert_eq!(actions, vec!["update", "view"]);

    assert!(matches!(
        repository.delete(view_permission.id()).await,
        Ok(true)
    ));
    assert!(matches!(repository.find_by_name(&view).await, Ok(None)));
}

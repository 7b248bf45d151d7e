use std::sync::Arc;

use chrono::Utc;

use tourdesk_core::AppError;
use tourdesk_domain::{Principal, RequiredAccess, Role, UserStatus};

use crate::PermissionRegistry;
use crate::test_support::{
    FakePermissionRepository, FakeRoleRepository, permission_name, role_name, user_id,
};

use super::AuthorizationService;

struct Fixture {
    service: AuthorizationService,
    permission_repository: Arc<FakePermissionRepository>,
}

async fn fixture(registered: &[&str], role_permissions: &[&str]) -> Fixture {
    let permission_repository = Arc::new(FakePermissionRepository::with_cap(10));
    permission_repository.seed(registered).await;

    let role_repository = Arc::new(FakeRoleRepository::default());
    let role = Role::new(
        role_name("editor"),
        "Editor",
        None,
        false,
        role_permissions
            .iter()
            .map(|permission| permission_name(permission)),
        Utc::now(),
    )
    .unwrap_or_else(|error| panic!("invalid role fixture: {error}"));
    role_repository.roles.lock().await.push(role);

    Fixture {
        service: AuthorizationService::new(
            role_repository,
            PermissionRegistry::new(permission_repository.clone()),
        ),
        permission_repository,
    }
}

fn principal(role: &str) -> Principal {
    Principal::new(user_id("user-1"), role_name(role), UserStatus::Active)
}

#[tokio::test]
async fn resolve_unknown_role_is_empty_and_denies() {
    let fixture = fixture(&["tour:view"], &["tour:view"]).await;

    let resolved = fixture.service.resolve(&role_name("ghost")).await;
    assert!(matches!(&resolved, Ok(permissions) if permissions.is_empty()));

    let allowed = fixture
        .service
        .has_permission(&principal("ghost"), &permission_name("tour:view"))
        .await;
    assert!(matches!(allowed, Ok(false)));
}

#[tokio::test]
async fn all_and_any_follow_and_or_semantics() {
    let fixture = fixture(
        &["tour:view", "tour:create", "tour:delete"],
        &["tour:view", "tour:create"],
    )
    .await;
    let user = principal("editor");

    let all_granted = fixture
        .service
        .has_all_permissions(
            &user,
            &[permission_name("tour:view"), permission_name("tour:create")],
        )
        .await;
    let all_partial = fixture
        .service
        .has_all_permissions(
            &user,
            &[permission_name("tour:view"), permission_name("tour:delete")],
        )
        .await;
    let any_partial = fixture
        .service
        .has_any_permission(
            &user,
            &[permission_name("tour:delete"), permission_name("tour:view")],
        )
        .await;

    assert!(matches!(all_granted, Ok(true)));
    assert!(matches!(all_partial, Ok(false)));
    assert!(matches!(any_partial, Ok(true)));
}

#[tokio::test]
async fn dangling_names_grant_by_name_but_do_not_enumerate() {
    let fixture = fixture(&["tour:view"], &["tour:view", "tour:teleport"]).await;

    let resolved = fixture
        .service
        .resolve(&role_name("editor"))
        .await
        .unwrap_or_else(|error| panic!("resolve failed: {error}"));

    assert_eq!(resolved.names().count(), 2);
    assert_eq!(resolved.records().len(), 1);

    let allowed = fixture
        .service
        .has_permission(&principal("editor"), &permission_name("tour:teleport"))
        .await;
    assert!(matches!(allowed, Ok(true)));
}

#[tokio::test]
async fn resolve_chunks_large_roles_under_the_store_cap() {
    let names = (0..15)
        .map(|index| format!("booking:step{index}"))
        .collect::<Vec<_>>();
    let refs = names.iter().map(String::as_str).collect::<Vec<_>>();
    let fixture = fixture(&refs, &refs).await;

    let resolved = fixture
        .service
        .resolve(&role_name("editor"))
        .await
        .unwrap_or_else(|error| panic!("resolve failed: {error}"));

    assert_eq!(resolved.records().len(), 15);
    let mut calls = fixture.permission_repository.batch_calls.lock().await.clone();
    calls.sort_unstable();
    assert_eq!(calls, vec![5, 10]);
}

#[tokio::test]
async fn has_role_compares_names_directly() {
    let fixture = fixture(&[], &[]).await;
    let user = principal("editor");

    assert!(fixture.service.has_role(&user, &role_name("editor")));
    assert!(!fixture.service.has_role(&user, &role_name("admin")));
}

#[tokio::test]
async fn authorize_without_principal_is_unauthorized() {
    let fixture = fixture(&["tour:view"], &["tour:view"]).await;

    let result = fixture
        .service
        .authorize(
            None,
            &RequiredAccess::Permission(permission_name("tour:view")),
        )
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn authorize_missing_permission_is_forbidden() {
    let fixture = fixture(&["tour:view"], &["tour:view"]).await;

    let result = fixture
        .service
        .authorize(
            Some(&principal("editor")),
            &RequiredAccess::Permission(permission_name("tour:delete")),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn authorize_admits_each_requirement_kind() {
    let fixture = fixture(&["tour:view", "tour:create"], &["tour:view", "tour:create"]).await;
    let user = principal("editor");

    for access in [
        RequiredAccess::Permission(permission_name("tour:view")),
        RequiredAccess::AnyOf(vec![
            permission_name("tour:delete"),
            permission_name("tour:create"),
        ]),
        RequiredAccess::AllOf(vec![
            permission_name("tour:view"),
            permission_name("tour:create"),
        ]),
        RequiredAccess::Role(role_name("editor")),
    ] {
        let result = fixture.service.authorize(Some(&user), &access).await;
        assert!(result.is_ok(), "denied {access}");
    }
}

#[tokio::test]
async fn authorize_rejects_banned_principal_even_with_permission() {
    let fixture = fixture(&["tour:view"], &["tour:view"]).await;
    let banned = Principal::new(user_id("user-2"), role_name("editor"), UserStatus::Banned);

    let result = fixture
        .service
        .authorize(
            Some(&banned),
            &RequiredAccess::Permission(permission_name("tour:view")),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn store_failure_propagates_from_resolution() {
    let mut permission_repository = FakePermissionRepository::with_cap(10);
    permission_repository.failing_name = Some(permission_name("tour:view"));
    let role_repository = Arc::new(FakeRoleRepository::default());
    role_repository.roles.lock().await.push(
        Role::new(
            role_name("editor"),
            "Editor",
            None,
            false,
            [permission_name("tour:view")],
            Utc::now(),
        )
        .unwrap_or_else(|error| panic!("invalid role fixture: {error}")),
    );
    let service = AuthorizationService::new(
        role_repository,
        PermissionRegistry::new(Arc::new(permission_repository)),
    );

    let result = service.resolve(&role_name("editor")).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

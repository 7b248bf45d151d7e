use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, get, patch, post, put};
use axum::{Extension, Router};
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{ADMIN_ROLE, PermissionName, RequiredAccess, RoleName};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let gates = Gates::new(&app_state)?;

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::me::me_handler))
        .route(
            "/api/me/permissions",
            get(handlers::me::my_permissions_handler),
        )
        .route(
            "/api/permissions",
            gates
                .view_permissions(get(handlers::permissions::list_permissions_handler))
                .merge(
                    gates.manage_permissions(post(
                        handlers::permissions::create_permission_handler,
                    )),
                ),
        )
        .route(
            "/api/permissions/resources/{resource}",
            gates.view_permissions(get(
                handlers::permissions::list_resource_permissions_handler,
            )),
        )
        .route(
            "/api/permissions/{permission_id}",
            gates
                .view_permissions(get(handlers::permissions::get_permission_handler))
                .merge(gates.manage_permissions(
                    put(handlers::permissions::update_permission_handler)
                        .delete(handlers::permissions::delete_permission_handler),
                )),
        )
        .route(
            "/api/roles",
            gates
                .view_roles(get(handlers::roles::list_roles_handler))
                .merge(gates.manage_roles(post(handlers::roles::create_role_handler))),
        )
        .route(
            "/api/roles/{role_id}",
            gates
                .view_roles(get(handlers::roles::get_role_handler))
                .merge(gates.manage_roles(
                    patch(handlers::roles::update_role_handler)
                        .delete(handlers::roles::delete_role_handler),
                )),
        )
        .route(
            "/api/users",
            gates.view_users(get(handlers::users::list_users_handler)),
        )
        .route(
            "/api/users/{user_id}",
            gates.view_users(get(handlers::users::get_user_handler)),
        )
        .route(
            "/api/users/{user_id}/role",
            gates.change_user_role(put(handlers::users::change_user_role_handler)),
        )
        .route(
            "/api/users/{user_id}/status",
            gates.change_user_status(put(handlers::users::change_user_status_handler)),
        )
        .route(
            "/api/admin/access-check",
            gates.admin_only(post(handlers::admin::access_check_handler)),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}

/// Route requirements, each applied through [`middleware::require_access`].
struct Gates {
    state: AppState,
    view_permissions: RequiredAccess,
    manage_permissions: RequiredAccess,
    view_roles: RequiredAccess,
    manage_roles: RequiredAccess,
    view_users: RequiredAccess,
    change_user_role: RequiredAccess,
    change_user_status: RequiredAccess,
    admin_only: RequiredAccess,
}

impl Gates {
    fn new(state: &AppState) -> AppResult<Self> {
        let permission = |name: &str| PermissionName::new(name).map(RequiredAccess::Permission);

        Ok(Self {
            state: state.clone(),
            view_permissions: permission("permission:view")?,
            manage_permissions: permission("permission:manage")?,
            view_roles: permission("role:view")?,
            manage_roles: permission("role:manage")?,
            view_users: permission("user:view")?,
            change_user_role: permission("user:change_role")?,
            change_user_status: RequiredAccess::AllOf(vec![
                PermissionName::new("user:update")?,
                PermissionName::new("user:change_role")?,
            ]),
            admin_only: RequiredAccess::Role(RoleName::new(ADMIN_ROLE)?),
        })
    }

    fn guard(
        &self,
        method_router: MethodRouter<AppState>,
        access: &RequiredAccess,
    ) -> MethodRouter<AppState> {
        method_router
            .route_layer(from_fn_with_state(
                self.state.clone(),
                middleware::require_access,
            ))
            .route_layer(Extension(access.clone()))
    }

    fn view_permissions(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.view_permissions)
    }

    fn manage_permissions(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.manage_permissions)
    }

    fn view_roles(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.view_roles)
    }

    fn manage_roles(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.manage_roles)
    }

    fn view_users(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.view_users)
    }

    fn change_user_role(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.change_user_role)
    }

    fn change_user_status(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.change_user_status)
    }

    fn admin_only(&self, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.guard(method_router, &self.admin_only)
    }
}

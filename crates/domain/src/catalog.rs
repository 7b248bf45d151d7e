//! Built-in permission and role definitions for the tour-booking platform.
//!
//! Seeding these is idempotent: redeploying a changed catalog redefines the
//! built-in roles' permission sets.

use tourdesk_core::AppResult;

use crate::{PermissionName, RoleName};

/// Role granted to identities seen for the first time.
pub const DEFAULT_ROLE: &str = "customer";

/// Role with every built-in permission.
pub const ADMIN_ROLE: &str = "admin";

/// Built-in permissions as `(name, description)` pairs.
pub const BUILTIN_PERMISSIONS: &[(&str, &str)] = &[
    ("tour:view", "View tours and their schedules"),
    ("tour:create", "Create tours"),
    ("tour:update", "Edit tours, pricing and schedules"),
    ("tour:delete", "Delete tours"),
    ("booking:view", "View bookings"),
    ("booking:create", "Create bookings"),
    ("booking:update", "Edit bookings"),
    ("booking:cancel", "Cancel bookings"),
    ("review:view", "View reviews"),
    ("review:create", "Write reviews"),
    ("review:delete", "Remove reviews"),
    ("user:view", "View user accounts"),
    ("user:update", "Edit user accounts and status"),
    ("user:change_role", "Change the role assigned to a user"),
    ("role:view", "View roles"),
    ("role:manage", "Create, edit and delete roles"),
    ("permission:view", "View permissions"),
    ("permission:manage", "Create, edit and delete permissions"),
];

const STAFF_PERMISSIONS: &[&str] = &[
    "tour:view",
    "tour:create",
    "tour:update",
    "booking:view",
    "booking:update",
    "booking:cancel",
    "review:view",
    "review:delete",
    "user:view",
];

const CUSTOMER_PERMISSIONS: &[&str] = &[
    "tour:view",
    "booking:view",
    "booking:create",
    "booking:cancel",
    "review:view",
    "review:create",
];

/// Built-in permission definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSeed {
    /// Permission name.
    pub name: PermissionName,
    /// Permission description.
    pub description: String,
}

/// Role definition applied by idempotent seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSeed {
    /// Role name used as the idempotency key.
    pub name: RoleName,
    /// Human-friendly name.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the role is system-managed.
    pub is_system: bool,
    /// Complete permission set.
    pub permissions: Vec<PermissionName>,
}

/// Returns the built-in permission definitions.
pub fn builtin_permissions() -> AppResult<Vec<PermissionSeed>> {
    BUILTIN_PERMISSIONS
        .iter()
        .map(|(name, description)| {
            Ok(PermissionSeed {
                name: PermissionName::new(*name)?,
                description: (*description).to_owned(),
            })
        })
        .collect()
}

/// Returns the built-in role definitions.
pub fn builtin_roles() -> AppResult<Vec<RoleSeed>> {
    let all_names = BUILTIN_PERMISSIONS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();

    Ok(vec![
        role_seed(
            ADMIN_ROLE,
            "Administrator",
            "Full access to the platform",
            &all_names,
        )?,
        role_seed(
            "staff",
            "Staff",
            "Operates tours and bookings",
            STAFF_PERMISSIONS,
        )?,
        role_seed(
            DEFAULT_ROLE,
            "Customer",
            "Books tours and writes reviews",
            CUSTOMER_PERMISSIONS,
        )?,
    ])
}

fn role_seed(
    name: &str,
    display_name: &str,
    description: &str,
    permissions: &[&str],
) -> AppResult<RoleSeed> {
    Ok(RoleSeed {
        name: RoleName::new(name)?,
        display_name: display_name.to_owned(),
        description: Some(description.to_owned()),
        is_system: true,
        permissions: permissions
            .iter()
            .map(|permission| PermissionName::new(*permission))
            .collect::<AppResult<Vec<_>>>()?,
    })
}

use std::fmt::{Display, Formatter};

use crate::{Permission, PermissionName, Role, RoleName};

/// Permission set resolved for one role at one point in time.
///
/// Name checks use the role's own name list, so a name that no longer exists
/// in the registry still grants. [`EffectivePermissions::records`] only lists
/// names that resolved to a registry record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectivePermissions {
    role: Option<Role>,
    permissions: Vec<Permission>,
}

impl EffectivePermissions {
    /// Returns the empty set granted when no role resolves.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a resolved set from a role and its resolved records.
    #[must_use]
    pub fn new(role: Role, permissions: Vec<Permission>) -> Self {
        Self {
            role: Some(role),
            permissions,
        }
    }

    /// Returns the resolved role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns the permission records that exist in the registry.
    #[must_use]
    pub fn records(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns the permission names listed by the role.
    pub fn names(&self) -> impl Iterator<Item = &PermissionName> {
        self.role.iter().flat_map(|role| role.permissions().iter())
    }

    /// Returns whether nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names().next().is_none()
    }

    /// Returns whether the permission name is granted.
    #[must_use]
    pub fn contains(&self, permission: &PermissionName) -> bool {
        self.role
            .as_ref()
            .is_some_and(|role| role.grants(permission))
    }

    /// Returns whether at least one of the names is granted.
    #[must_use]
    pub fn contains_any(&self, permissions: &[PermissionName]) -> bool {
        permissions
            .iter()
            .any(|permission| self.contains(permission))
    }

    /// Returns whether every name is granted. An empty list is vacuously granted.
    #[must_use]
    pub fn contains_all(&self, permissions: &[PermissionName]) -> bool {
        permissions
            .iter()
            .all(|permission| self.contains(permission))
    }
}

/// Requirement a route places on the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredAccess {
    /// One permission name must be granted.
    Permission(PermissionName),
    /// At least one of the names must be granted.
    AnyOf(Vec<PermissionName>),
    /// All of the names must be granted.
    AllOf(Vec<PermissionName>),
    /// The caller's role must equal this name.
    Role(RoleName),
}

impl Display for RequiredAccess {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permission(permission) => write!(formatter, "permission '{permission}'"),
            Self::AnyOf(permissions) => {
                write!(formatter, "any of [{}]", join_names(permissions))
            }
            Self::AllOf(permissions) => {
                write!(formatter, "all of [{}]", join_names(permissions))
            }
            Self::Role(role) => write!(formatter, "role '{role}'"),
        }
    }
}

fn join_names(permissions: &[PermissionName]) -> String {
    permissions
        .iter()
        .map(PermissionName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{EffectivePermissions, RequiredAccess};
    use crate::{PermissionName, Role, RoleName};

    fn name(value: &str) -> PermissionName {
        PermissionName::new(value).unwrap_or_else(|error| panic!("invalid fixture: {error}"))
    }

    fn effective(permissions: &[&str]) -> EffectivePermissions {
        let role = Role::new(
            RoleName::new("guide").unwrap_or_else(|error| panic!("{error}")),
            "Guide",
            None,
            false,
            permissions.iter().map(|value| name(value)),
            Utc::now(),
        )
        .unwrap_or_else(|error| panic!("{error}"));

        EffectivePermissions::new(role, Vec::new())
    }

    #[test]
    fn empty_set_grants_nothing() {
        let permissions = EffectivePermissions::empty();
        assert!(permissions.is_empty());
        assert!(!permissions.contains(&name("tour:view")));
        assert!(!permissions.contains_any(&[name("tour:view")]));
    }

    #[test]
    fn any_and_all_follow_or_and_semantics() {
        let permissions = effective(&["tour:view", "tour:create"]);

        assert!(permissions.contains_all(&[name("tour:view"), name("tour:create")]));
        assert!(!permissions.contains_all(&[name("tour:view"), name("tour:delete")]));
        assert!(permissions.contains_any(&[name("tour:delete"), name("tour:view")]));
        assert!(!permissions.contains_any(&[]));
        assert!(permissions.contains_all(&[]));
    }

    #[test]
    fn required_access_describes_itself() {
        let access = RequiredAccess::AllOf(vec![name("user:update"), name("user:change_role")]);
        assert_eq!(access.to_string(), "all of [user:update, user:change_role]");
    }
}

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tourdesk_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::permission::{PermissionName, normalize_description, validate_name_segment};

/// Unique name of a role, assigned to users by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Creates a validated role name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        validate_name_segment(trimmed, "role name", trimmed)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for RoleName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Generated identifier of a role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a role identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid role id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Named, denormalized set of permission names.
///
/// Permission names are not foreign keys: a role may reference names that no
/// longer exist in the permission registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: RoleName,
    display_name: NonEmptyString,
    description: Option<String>,
    is_system: bool,
    permissions: BTreeSet<PermissionName>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new role with a generated identifier.
    pub fn new(
        name: RoleName,
        display_name: impl Into<String>,
        description: Option<String>,
        is_system: bool,
        permissions: impl IntoIterator<Item = PermissionName>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: RoleId::new(),
            name,
            display_name: NonEmptyString::new(display_name)?,
            description: normalize_description(description),
            is_system,
            permissions: permissions.into_iter().collect(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a role from persisted values.
    pub fn from_stored(stored: StoredRole) -> AppResult<Self> {
        Ok(Self {
            id: stored.id,
            name: stored.name,
            display_name: NonEmptyString::new(stored.display_name)?,
            description: stored.description,
            is_system: stored.is_system,
            permissions: stored.permissions.into_iter().collect(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    /// Returns the generated identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the human-friendly name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether this role is system-managed.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the permission names granted by this role.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<PermissionName> {
        &self.permissions
    }

    /// Returns whether the role lists the permission name.
    #[must_use]
    pub fn grants(&self, permission: &PermissionName) -> bool {
        self.permissions.contains(permission)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Changes the unique name. Callers enforce uniqueness and protection.
    pub fn rename(&mut self, name: RoleName, now: DateTime<Utc>) {
        self.name = name;
        self.updated_at = now;
    }

    /// Replaces the display name.
    pub fn set_display_name(
        &mut self,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.display_name = NonEmptyString::new(display_name)?;
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>, now: DateTime<Utc>) {
        self.description = normalize_description(description);
        self.updated_at = now;
    }

    /// Marks or unmarks the role as system-managed.
    pub fn set_system(&mut self, is_system: bool, now: DateTime<Utc>) {
        self.is_system = is_system;
        self.updated_at = now;
    }

    /// Replaces the whole permission set.
    pub fn replace_permissions(
        &mut self,
        permissions: impl IntoIterator<Item = PermissionName>,
        now: DateTime<Utc>,
    ) {
        self.permissions = permissions.into_iter().collect();
        self.updated_at = now;
    }
}

/// Persisted role values used to rehydrate a [`Role`].
#[derive(Debug, Clone)]
pub struct StoredRole {
    /// Stored identifier.
    pub id: RoleId,
    /// Stored unique name.
    pub name: RoleName,
    /// Stored display name.
    pub display_name: String,
    /// Stored description.
    pub description: Option<String>,
    /// Stored system flag.
    pub is_system: bool,
    /// Stored permission names.
    pub permissions: Vec<PermissionName>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Role, RoleName};
    use crate::PermissionName;

    fn permission(value: &str) -> PermissionName {
        PermissionName::new(value).unwrap_or_else(|error| panic!("invalid fixture: {error}"))
    }

    #[test]
    fn role_name_rejects_separator_and_blank() {
        assert!(RoleName::new("tour:admin").is_err());
        assert!(RoleName::new("   ").is_err());
        assert!(RoleName::new("guide").is_ok());
    }

    #[test]
    fn duplicate_permission_names_collapse_into_one_entry() {
        let name = RoleName::new("guide").unwrap_or_else(|error| panic!("{error}"));
        let role = Role::new(
            name,
            "Tour guide",
            None,
            false,
            [permission("tour:view"), permission("tour:view")],
            Utc::now(),
        )
        .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(role.permissions().len(), 1);
        assert!(role.grants(&permission("tour:view")));
    }

    #[test]
    fn replace_permissions_is_not_additive() {
        let name = RoleName::new("guide").unwrap_or_else(|error| panic!("{error}"));
        let mut role = Role::new(
            name,
            "Tour guide",
            None,
            false,
            [permission("tour:view")],
            Utc::now(),
        )
        .unwrap_or_else(|error| panic!("{error}"));

        role.replace_permissions([permission("booking:view")], Utc::now());

        assert!(!role.grants(&permission("tour:view")));
        assert!(role.grants(&permission("booking:view")));
    }
}

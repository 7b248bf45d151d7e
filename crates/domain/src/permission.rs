use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tourdesk_core::{AppError, AppResult};
use uuid::Uuid;

/// Lookup key of a permission, always of the form `resource:action`.
///
/// Both segments are limited to ASCII lowercase letters, digits, `_` and `-`,
/// which keeps the separator unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(String);

impl PermissionName {
    /// Creates a validated permission name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        let Some((resource, action)) = trimmed.split_once(':') else {
            return Err(AppError::Validation(format!(
                "permission name '{trimmed}' must have the form 'resource:action'"
            )));
        };

        validate_name_segment(trimmed, "resource", resource)?;
        validate_name_segment(trimmed, "action", action)?;

        Ok(Self(trimmed.to_owned()))
    }

    /// Builds a permission name from its two segments.
    pub fn from_parts(resource: &str, action: &str) -> AppResult<Self> {
        Self::new(format!("{resource}:{action}"))
    }

    /// Returns the full `resource:action` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the resource segment.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.0.split_once(':').map_or("", |(resource, _)| resource)
    }

    /// Returns the action segment.
    #[must_use]
    pub fn action(&self) -> &str {
        self.0.split_once(':').map_or("", |(_, action)| action)
    }
}

impl FromStr for PermissionName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for PermissionName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionName> for String {
    fn from(value: PermissionName) -> Self {
        value.0
    }
}

impl AsRef<str> for PermissionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for PermissionName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

pub(crate) fn validate_name_segment(full: &str, label: &str, segment: &str) -> AppResult<()> {
    if segment.is_empty() {
        return Err(AppError::Validation(format!(
            "{label} segment of '{full}' must not be empty"
        )));
    }

    if let Some(invalid) = segment
        .chars()
        .find(|character| !is_name_character(*character))
    {
        return Err(AppError::Validation(format!(
            "{label} segment of '{full}' contains invalid character '{invalid}'"
        )));
    }

    Ok(())
}

pub(crate) fn is_name_character(character: char) -> bool {
    character.is_ascii_lowercase() || character.is_ascii_digit() || matches!(character, '_' | '-')
}

/// Generated identifier of a permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionId(Uuid);

impl PermissionId {
    /// Creates a random permission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a permission identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a permission identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid permission id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// An atomic capability registered in the permission registry.
///
/// The name is the identity used by roles and checks; it never changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: PermissionId,
    name: PermissionName,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Permission {
    /// Creates a new permission with a generated identifier.
    #[must_use]
    pub fn new(name: PermissionName, description: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: PermissionId::new(),
            name,
            description: normalize_description(description),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrates a permission from persisted values.
    #[must_use]
    pub fn from_stored(
        id: PermissionId,
        name: PermissionName,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            created_at,
            updated_at,
        }
    }

    /// Returns the generated identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the unique `resource:action` name.
    #[must_use]
    pub fn name(&self) -> &PermissionName {
        &self.name
    }

    /// Returns the resource segment of the name.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.name.resource()
    }

    /// Returns the action segment of the name.
    #[must_use]
    pub fn action(&self) -> &str {
        self.name.action()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
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

    /// Replaces the description and refreshes the update timestamp.
    pub fn set_description(&mut self, description: Option<String>, now: DateTime<Utc>) {
        self.description = normalize_description(description);
        self.updated_at = now;
    }
}

pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use super::{Permission, PermissionName};

    #[test]
    fn permission_name_exposes_segments() {
        let name = PermissionName::new("booking:cancel");
        assert!(name.is_ok());

        let name = name.unwrap_or_else(|error| panic!("unexpected error: {error}"));
        assert_eq!(name.resource(), "booking");
        assert_eq!(name.action(), "cancel");
    }

    #[test]
    fn permission_name_trims_surrounding_whitespace() {
        let name = PermissionName::new("  tour:view ")
            .unwrap_or_else(|error| panic!("unexpected error: {error}"));
        assert_eq!(name.as_str(), "tour:view");
    }

    #[test]
    fn permission_name_rejects_malformed_values() {
        for value in ["tour", "tour:", ":view", "tour:view:all", "Tour:view", "tour view:x", ""] {
            assert!(PermissionName::new(value).is_err(), "accepted '{value}'");
        }
    }

    #[test]
    fn permission_description_is_normalized() {
        let name = PermissionName::new("review:delete")
            .unwrap_or_else(|error| panic!("unexpected error: {error}"));
        let permission = Permission::new(name, Some("   ".to_owned()), Utc::now());
        assert_eq!(permission.description(), None);
        assert_eq!(permission.created_at(), permission.updated_at());
    }

    proptest! {
        #[test]
        fn valid_segments_always_parse(
            resource in "[a-z0-9_-]{1,16}",
            action in "[a-z0-9_-]{1,16}",
        ) {
            let name = PermissionName::from_parts(&resource, &action);
            prop_assert!(name.is_ok());
            let name = name.unwrap_or_else(|error| panic!("unexpected error: {error}"));
            prop_assert_eq!(name.resource(), resource.as_str());
            prop_assert_eq!(name.action(), action.as_str());
        }

        #[test]
        fn uppercase_segments_never_parse(
            resource in "[A-Z]{1,8}",
            action in "[a-z]{1,8}",
        ) {
            prop_assert!(PermissionName::from_parts(&resource, &action).is_err());
        }
    }
}

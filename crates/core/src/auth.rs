use serde::{Deserialize, Serialize};

/// Identity asserted by the external identity provider for one bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    email: Option<String>,
    display_name: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from verified provider claims.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email,
            display_name,
        }
    }

    /// Returns the stable subject (provider user id).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name, if the provider returned one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

//! Portal login credentials.

use std::fmt;

use crate::error::CoreError;

/// Username and password for the customer portal.
///
/// Immutable once built. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials without validation.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates credentials, rejecting blank fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if either field is empty or
    /// whitespace only.
    pub fn try_new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let creds = Self::new(username, password);
        if creds.username.trim().is_empty() {
            return Err(CoreError::InvalidConfig("username is required".to_string()));
        }
        if creds.password.is_empty() {
            return Err(CoreError::InvalidConfig("password is required".to_string()));
        }
        Ok(creds)
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

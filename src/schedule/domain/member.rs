//! Development team member entity.

use super::ScheduleDomainError;
use serde::{Deserialize, Serialize};

/// A grant writer or development lead who can own scheduled tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevTeamMember {
    name: String,
    email: Option<String>,
    role: Option<String>,
}

impl DevTeamMember {
    /// Creates a team member from their full name as it appears in the
    /// writing schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyMemberName`] when the name is
    /// empty after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScheduleDomainError::EmptyMemberName);
        }
        Ok(Self {
            name,
            email: None,
            role: None,
        })
    }

    /// Attaches an email address.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::InvalidEmail`] when the address lacks
    /// an `@` separator.
    pub fn with_email(mut self, email: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let email = email.into();
        if !email.contains('@') {
            return Err(ScheduleDomainError::InvalidEmail(email));
        }
        self.email = Some(email);
        Ok(self)
    }

    /// Attaches a role description.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Returns the member's full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address when known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role when known.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Checks whether the given name matches this member, case-insensitively.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        !needle.is_empty() && self.name.trim().to_lowercase() == needle
    }
}

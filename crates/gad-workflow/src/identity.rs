use serde::{Deserialize, Serialize};
use std::fmt;

/// What a session is allowed to do.
///
/// Supplied by the identity collaborator; the workflow reads it, never
/// writes it. Permission checks live on the engine operations themselves
/// rather than being scattered across rendering code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Creates submissions for their own office
    Provider,
    /// Approves or denies Pending submissions
    Reviewer,
    /// Both, plus registration notices
    Administrator,
}

impl Role {
    /// Whether this role may commit new submissions.
    #[inline]
    #[must_use]
    pub fn can_submit(self) -> bool {
        matches!(self, Self::Provider | Self::Administrator)
    }

    /// Whether this role may resolve Pending submissions.
    #[inline]
    #[must_use]
    pub fn can_review(self) -> bool {
        matches!(self, Self::Reviewer | Self::Administrator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider => write!(f, "Provider"),
            Self::Reviewer => write!(f, "Reviewer"),
            Self::Administrator => write!(f, "Administrator"),
        }
    }
}

/// Who is acting: role, office and display identity.
///
/// Treated as an opaque snapshot. Records store `display_name()` and
/// `office` as copied strings, so later identity changes never rewrite
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,
    pub office: String,
    pub first_name: String,
    pub last_name: String,
}

impl Identity {
    #[must_use]
    pub fn new(
        role: Role,
        office: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            role,
            office: office.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The identity string recorded on submissions and notifications.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_first_and_last() {
        let id = Identity::new(Role::Provider, "CPDSO", "A.", "Reyes");
        assert_eq!(id.display_name(), "A. Reyes");
    }

    #[test]
    fn role_permissions_match_the_matrix() {
        assert!(Role::Provider.can_submit());
        assert!(!Role::Provider.can_review());
        assert!(Role::Reviewer.can_review());
        assert!(!Role::Reviewer.can_submit());
        assert!(Role::Administrator.can_submit());
        assert!(Role::Administrator.can_review());
    }
}

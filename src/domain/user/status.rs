//! User account status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Whether a user may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    /// Only active users can authenticate.
    pub fn can_authenticate(&self) -> bool {
        matches!(self, UserStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_can_authenticate() {
        assert!(UserStatus::Active.can_authenticate());
        assert!(!UserStatus::Inactive.can_authenticate());
        assert!(!UserStatus::Suspended.can_authenticate());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("SUSPENDED".parse::<UserStatus>().unwrap(), UserStatus::Suspended);
        assert!("banned".parse::<UserStatus>().is_err());
    }
}

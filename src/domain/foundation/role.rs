//! User role enumeration shared by the user aggregate and authorization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Role granted to a back-office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    Customer,
    Manager,
    Admin,
}

impl UserRole {
    /// Managers and admins maintain the product catalog.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, UserRole::Manager | UserRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "Customer",
            UserRole::Manager => "Manager",
            UserRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(UserRole::Customer),
            "Manager" => Ok(UserRole::Manager),
            "Admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_management_requires_manager_or_admin() {
        assert!(!UserRole::Customer.can_manage_catalog());
        assert!(UserRole::Manager.can_manage_catalog());
        assert!(UserRole::Admin.can_manage_catalog());
    }

    #[test]
    fn parses_display_form() {
        for role in [UserRole::Customer, UserRole::Manager, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("root".parse::<UserRole>().is_err());
    }
}

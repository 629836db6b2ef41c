//! User value objects.
//!
//! Every constructor validates its input, so a `User` assembled from these
//! types is always well formed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Login name shown in the back-office.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        let len = trimmed.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
            return Err(ValidationError::out_of_range(
                "username",
                MIN_USERNAME_LENGTH as i64,
                MAX_USERNAME_LENGTH as i64,
                len as i64,
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address, normalized to lower case.
///
/// Uniqueness is enforced by the handlers; normalizing here makes the
/// comparison case-insensitive everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::invalid_format("email", "address is too long"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }

        let (local, domain) = trimmed
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing '@'"))?;

        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed local part"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format("email", "malformed domain"));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phone number in loose E.164 form: optional `+`, then 8-15 digits not
/// starting with zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }

        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let valid = (8..=15).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');

        if !valid {
            return Err(ValidationError::invalid_format(
                "phone",
                "expected an optional '+' followed by 8 to 15 digits",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks the plain-text password policy before hashing.
///
/// The password itself is never stored.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::invalid_format(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !(has_upper && has_lower && has_digit && has_special) {
        return Err(ValidationError::invalid_format(
            "password",
            "must contain upper case, lower case, digit and special characters",
        ));
    }

    Ok(())
}

/// First and last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub firstname: String,
    pub lastname: String,
}

impl PersonName {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let firstname = firstname.into().trim().to_string();
        let lastname = lastname.into().trim().to_string();
        if firstname.is_empty() {
            return Err(ValidationError::empty_field("name.firstname"));
        }
        if lastname.is_empty() {
            return Err(ValidationError::empty_field("name.lastname"));
        }
        Ok(Self { firstname, lastname })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Latitude/longitude pair, kept as the strings clients send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: i32,
    pub zipcode: String,
    pub geolocation: Geolocation,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        number: i32,
        zipcode: impl Into<String>,
        geolocation: Geolocation,
    ) -> Result<Self, ValidationError> {
        if number < 0 {
            return Err(ValidationError::out_of_range(
                "address.number",
                0,
                i64::from(i32::MAX),
                i64::from(number),
            ));
        }
        Ok(Self {
            city: city.into(),
            street: street.into(),
            number,
            zipcode: zipcode.into(),
            geolocation,
        })
    }
}

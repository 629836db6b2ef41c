//! User domain module.
//!
//! Back-office accounts: profile data, role and account status. Passwords
//! are validated here but only ever stored as hashes produced by the
//! `PasswordHasher` port.

mod aggregate;
mod errors;
mod status;
mod values;

pub use aggregate::{User, UserDetails};
pub use errors::UserError;
pub use status::UserStatus;
pub use values::{
    validate_password, Address, Email, Geolocation, PersonName, Phone, Username,
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub(crate) use aggregate::test_support;

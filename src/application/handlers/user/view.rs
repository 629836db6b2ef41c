//! Read model and shared input shapes for user handlers.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId, UserRole, ValidationError};
use crate::domain::user::{
    Address, Email, Geolocation, PersonName, Phone, User, UserDetails, UserStatus, Username,
};

/// What callers get back from user handlers. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub name: PersonName,
    pub address: Address,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            phone: user.phone().as_str().to_string(),
            role: user.role(),
            status: user.status(),
            name: user.name().clone(),
            address: user.address().clone(),
            created_at: *user.created_at(),
            updated_at: *user.updated_at(),
        }
    }
}

/// Raw address fields as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub city: String,
    pub street: String,
    pub number: i32,
    pub zipcode: String,
    pub lat: String,
    pub long: String,
}

/// Raw profile fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileInput {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub firstname: String,
    pub lastname: String,
    pub address: AddressInput,
}

impl UserProfileInput {
    /// Validates every field and assembles the domain details.
    pub fn into_details(
        self,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserDetails, ValidationError> {
        Ok(UserDetails {
            username: Username::new(self.username)?,
            email: Email::new(&self.email)?,
            phone: Phone::new(&self.phone)?,
            role,
            status,
            name: PersonName::new(self.firstname, self.lastname)?,
            address: Address::new(
                self.address.city,
                self.address.street,
                self.address.number,
                self.address.zipcode,
                Geolocation {
                    lat: self.address.lat,
                    long: self.address.long,
                },
            )?,
        })
    }
}

#[cfg(test)]
pub(crate) fn profile_input(email: &str) -> UserProfileInput {
    UserProfileInput {
        username: "johnd".to_string(),
        email: email.to_string(),
        phone: "+5511987654321".to_string(),
        firstname: "John".to_string(),
        lastname: "Doe".to_string(),
        address: AddressInput {
            city: "Recife".to_string(),
            street: "Rua A".to_string(),
            number: 10,
            zipcode: "50000-000".to_string(),
            lat: "-8.05".to_string(),
            long: "-34.9".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_omits_password_hash() {
        let user = crate::domain::user::test_support::test_user("john@example.com");
        let json = serde_json::to_value(UserView::from(&user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "john@example.com");
    }

    #[test]
    fn into_details_reports_first_bad_field() {
        let mut input = profile_input("john@example.com");
        input.phone = "abc".to_string();
        let err = input.into_details(UserRole::Customer, UserStatus::Active).unwrap_err();
        assert_eq!(err.field(), "phone");
    }
}

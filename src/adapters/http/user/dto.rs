//! HTTP DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::user::{
    AddressInput, CreateUserCommand, UpdateUserCommand, UserProfileInput, UserView,
};
use crate::domain::foundation::{UserId, UserRole, ValidationError};
use crate::domain::user::UserStatus;

// ════════════════════════════════════════════════════════════════════════════
// Shared nested shapes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDto {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeolocationDto {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub long: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDto {
    pub city: String,
    pub street: String,
    pub number: i32,
    pub zipcode: String,
    #[serde(default)]
    pub geolocation: GeolocationDto,
}

impl From<AddressDto> for AddressInput {
    fn from(dto: AddressDto) -> Self {
        Self {
            city: dto.city,
            street: dto.street,
            number: dto.number,
            zipcode: dto.zipcode,
            lat: dto.geolocation.lat,
            long: dto.geolocation.long,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub name: NameDto,
    pub address: AddressDto,
}

impl UserRequest {
    fn profile(self) -> (UserProfileInput, Option<String>, Option<String>, Option<String>) {
        let profile = UserProfileInput {
            username: self.username,
            email: self.email,
            phone: self.phone,
            firstname: self.name.firstname,
            lastname: self.name.lastname,
            address: self.address.into(),
        };
        (profile, self.password, self.role, self.status)
    }

    pub fn into_create_command(self) -> Result<CreateUserCommand, ValidationError> {
        let (profile, password, role, status) = self.profile();
        Ok(CreateUserCommand {
            profile,
            password: password.ok_or_else(|| ValidationError::empty_field("password"))?,
            role: parse_role(role)?,
            status: parse_status(status)?,
        })
    }

    pub fn into_update_command(self, user_id: UserId) -> Result<UpdateUserCommand, ValidationError> {
        let (profile, password, role, status) = self.profile();
        Ok(UpdateUserCommand {
            user_id,
            profile,
            password: password.filter(|p| !p.is_empty()),
            role: parse_role(role)?,
            status: parse_status(status)?,
        })
    }
}

fn parse_role(raw: Option<String>) -> Result<Option<UserRole>, ValidationError> {
    raw.map(|r| r.parse()).transpose()
}

fn parse_status(raw: Option<String>) -> Result<Option<UserStatus>, ValidationError> {
    raw.map(|s| s.parse()).transpose()
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub status: String,
    pub name: NameDto,
    pub address: AddressDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id.to_string(),
            username: view.username,
            email: view.email,
            phone: view.phone,
            role: view.role.to_string(),
            status: view.status.to_string(),
            name: NameDto {
                firstname: view.name.firstname,
                lastname: view.name.lastname,
            },
            address: AddressDto {
                city: view.address.city,
                street: view.address.street,
                number: view.address.number,
                zipcode: view.address.zipcode,
                geolocation: GeolocationDto {
                    lat: view.address.geolocation.lat,
                    long: view.address.geolocation.long,
                },
            },
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

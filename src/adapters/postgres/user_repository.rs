//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, Repository, Timestamp, UserId, UserRole,
};
use crate::domain::user::{
    Address, Email, Geolocation, PersonName, Phone, User, UserDetails, UserStatus, Username,
};
use crate::ports::UserRepository;

use super::{corrupt_row, db_error, limit_offset, order_by, violates};

const EMAIL_CONSTRAINT: &str = "users_email_key";

const USER_COLUMNS: &str = r#"
    id, username, email, password_hash, phone, role, status,
    firstname, lastname, city, street, address_number, zipcode, geo_lat, geo_long,
    created_at, updated_at
"#;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sort_column(field: &str) -> &'static str {
    match field {
        "username" => "username",
        "email" => "email",
        _ => "created_at",
    }
}

fn write_error(action: &str, user: &User, e: sqlx::Error) -> DomainError {
    if violates(&e, EMAIL_CONSTRAINT) {
        return DomainError::new(ErrorCode::DuplicateEmail, "Email already registered")
            .with_detail("email", user.email().as_str());
    }
    db_error(action, e)
}

#[async_trait]
impl Repository<User, UserId> for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let name = user.name();
        let address = user.address();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, password_hash, phone, role, status,
                firstname, lastname, city, street, address_number, zipcode, geo_lat, geo_long,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash())
        .bind(user.phone().as_str())
        .bind(user.role().as_str())
        .bind(user.status().as_str())
        .bind(&name.firstname)
        .bind(&name.lastname)
        .bind(&address.city)
        .bind(&address.street)
        .bind(address.number)
        .bind(&address.zipcode)
        .bind(&address.geolocation.lat)
        .bind(&address.geolocation.long)
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("insert user", user, e))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let name = user.name();
        let address = user.address();

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                password_hash = $4,
                phone = $5,
                role = $6,
                status = $7,
                firstname = $8,
                lastname = $9,
                city = $10,
                street = $11,
                address_number = $12,
                zipcode = $13,
                geo_lat = $14,
                geo_long = $15,
                updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash())
        .bind(user.phone().as_str())
        .bind(user.role().as_str())
        .bind(user.status().as_str())
        .bind(&name.firstname)
        .bind(&name.lastname)
        .bind(&address.city)
        .bind(&address.street)
        .bind(address.number)
        .bind(&address.zipcode)
        .bind(&address.geolocation.lat)
        .bind(&address.geolocation.long)
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update user", user, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count users", e))?;

        let (limit, offset) = limit_offset(request);
        let query = format!(
            "SELECT {} FROM users {} LIMIT $1 OFFSET $2",
            USER_COLUMNS,
            order_by(request, sort_column)
        );
        let rows = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch users", e))?;

        let users = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(users, total.0.max(0) as u64, request))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch user by email", e))?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    let get_str = |column: &str| -> Result<String, DomainError> {
        row.try_get::<String, _>(column)
            .map_err(|e| db_error(&format!("read users.{}", column), e))
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_error("read users.id", e))?;
    let role: UserRole = get_str("role")?
        .parse()
        .map_err(|e| corrupt_row("role", e))?;
    let status: UserStatus = get_str("status")?
        .parse()
        .map_err(|e| corrupt_row("status", e))?;
    let number: i32 = row
        .try_get("address_number")
        .map_err(|e| db_error("read users.address_number", e))?;

    let details = UserDetails {
        username: Username::new(get_str("username")?).map_err(|e| corrupt_row("username", e))?,
        email: Email::new(get_str("email")?).map_err(|e| corrupt_row("email", e))?,
        phone: Phone::new(get_str("phone")?).map_err(|e| corrupt_row("phone", e))?,
        role,
        status,
        name: PersonName {
            firstname: get_str("firstname")?,
            lastname: get_str("lastname")?,
        },
        address: Address {
            city: get_str("city")?,
            street: get_str("street")?,
            number,
            zipcode: get_str("zipcode")?,
            geolocation: Geolocation {
                lat: get_str("geo_lat")?,
                long: get_str("geo_long")?,
            },
        },
    };

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("read users.created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("read users.updated_at", e))?;

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        details,
        get_str("password_hash")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

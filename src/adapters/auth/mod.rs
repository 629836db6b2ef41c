//! Authentication adapters.
//!
//! - `jwt` - HS256 token issuing and validation
//! - `password` - PBKDF2-HMAC-SHA256 password hashing
//! - `mock` - Session validator for tests that don't need real tokens

mod jwt;
mod mock;
mod password;

pub use jwt::JwtTokenService;
pub use mock::MockSessionValidator;
pub use password::{Pbkdf2PasswordHasher, DEFAULT_ROUNDS};

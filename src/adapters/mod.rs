//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - PBKDF2 password hashing, JWT issuing and validation
//! - `events` - Event publishers (logging, in-memory)
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::{InMemoryEventBus, LoggingEventPublisher};

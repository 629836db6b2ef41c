//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the event and repository
//! contracts that form the vocabulary of the back-office domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod money;
mod pagination;
mod repository;
mod role;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{CartId, ProductId, SaleId, SaleItemId, UserId};
pub use money::Money;
pub use pagination::{
    parse_order, Page, PageRequest, SortDirection, SortKey, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use repository::Repository;
pub use role::UserRole;
pub use timestamp::Timestamp;

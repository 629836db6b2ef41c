//! Command infrastructure for CQRS handlers.
//!
//! Instead of each handler accepting the acting user, a correlation ID and
//! a source separately, they accept a single `CommandMetadata` struct.

use uuid::Uuid;

use super::{AuthenticatedUser, UserId};

/// Metadata context for command handlers.
///
/// Carries the acting user (absent for anonymous operations such as
/// registration and login) and correlation context through the command
/// processing pipeline. Propagated to emitted events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandMetadata {
    actor: Option<AuthenticatedUser>,

    /// Links related operations across a single request.
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "seed").
    source: Option<String>,
}

impl CommandMetadata {
    /// Metadata for a command issued by an authenticated user.
    pub fn for_user(actor: AuthenticatedUser) -> Self {
        Self {
            actor: Some(actor),
            ..Default::default()
        }
    }

    /// Metadata for a command without an authenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn actor(&self) -> Option<&AuthenticatedUser> {
        self.actor.as_ref()
    }

    pub fn actor_id(&self) -> Option<UserId> {
        self.actor.as_ref().map(|a| a.id)
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Metadata for an admin caller; only available in test builds.
    pub fn test_admin() -> Self {
        Self::for_user(AuthenticatedUser::new(
            UserId::new(),
            "admin@example.com",
            super::UserRole::Admin,
        ))
        .with_correlation_id("test-correlation-id")
        .with_source("test")
    }
}

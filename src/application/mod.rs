//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each resource owns a module of command handlers (write) and query
//! handlers (read); the HTTP layer dispatches to them through per-resource
//! handler bundles.

pub mod handlers;

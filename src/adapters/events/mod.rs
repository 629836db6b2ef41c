//! Event publisher adapters.
//!
//! - `LoggingEventPublisher` - Writes events to the structured log
//! - `InMemoryEventBus` - Captures events for test assertions

mod in_memory;
mod logging;

pub use in_memory::InMemoryEventBus;
pub use logging::LoggingEventPublisher;

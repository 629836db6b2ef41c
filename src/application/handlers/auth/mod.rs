//! Sign-in handler.

mod authenticate;

pub use authenticate::{
    AuthenticateCommand, AuthenticateHandler, AuthenticateResult, AuthenticationError,
};

//! User command and query handlers.

mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod update_user;
mod view;

pub use create_user::{CreateUserCommand, CreateUserHandler};
pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use get_user::{GetUserHandler, GetUserQuery};
pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use update_user::{UpdateUserCommand, UpdateUserHandler};
pub use view::{AddressInput, UserProfileInput, UserView};

#[cfg(test)]
pub(crate) use view::profile_input;

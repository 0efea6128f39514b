//! Session state and lifecycle for the application shell.
//! Keep the public surface thin and split implementation across sub-modules.

mod session;
mod user;

pub use session::{SessionState, SessionStore};
pub use user::User;

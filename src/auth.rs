//! Auth-domain secrets, cached credentials, and the token manager.

pub mod credential;
pub mod secret;
pub mod token_manager;

pub use credential::*;
pub use secret::*;
pub use token_manager::*;

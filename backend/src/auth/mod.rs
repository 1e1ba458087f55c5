//! Account credentials and bearer tokens.
//!
//! - [`password`] hashes and verifies account passwords (Argon2id)
//! - [`TokenIssuer`] signs and verifies HS256 tokens carrying [`Claims`]
//! - [`Auth`] extracts verified claims from the `Authorization` header
mod extract;
pub mod password;
mod token;

pub use extract::*;
pub use token::*;

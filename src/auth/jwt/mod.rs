//! JWT token handling
//!
//! Access tokens are short JWTs naming the user and the server-side session
//! they belong to. Refresh tokens are opaque random strings and never JWTs.

mod handler;
pub mod types;

#[cfg(test)]
mod tests;

pub use handler::AccessGrant;
pub use types::{Claims, JwtHandler};

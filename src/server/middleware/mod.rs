//! Request authentication
//!
//! Handlers opt into authentication by taking an [`AuthenticatedUser`]
//! (401 without a live session) or a [`MaybeUser`] (anonymous allowed).
//! Resource checks run inside the handlers through
//! [`AuthenticatedUser::require`].

mod auth;
mod helpers;


pub use auth::{AuthenticatedUser, MaybeUser};
pub use helpers::extract_bearer_token;

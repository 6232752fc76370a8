//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated principal from a JWT Bearer token.
//! - [`ownership::OwnedSavedCity`] -- Loads a saved city and requires the caller to own it.

pub mod auth;
pub mod ownership;

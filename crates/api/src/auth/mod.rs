//! Authentication primitives.
//!
//! - [`jwt`] -- bearer token verification (and issuance for local tooling).

pub mod jwt;

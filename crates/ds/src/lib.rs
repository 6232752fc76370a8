//! HTTP client for the external data-science scoring service.
//!
//! The service owns all prediction, recommendation, and visualization
//! logic. This crate only shapes the outbound requests and decodes the
//! responses; nothing is cached and nothing is retried.

pub mod client;
pub mod models;

pub use client::{DsClient, DsConfig, DsError};
pub use models::Prediction;

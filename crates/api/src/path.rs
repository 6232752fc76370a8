//! Path parameter coercion shared by handlers and extractors.

use cityspire_core::error::CoreError;
use cityspire_core::types::DbId;

/// Parse a numeric id path segment, naming the parameter in the error.
pub fn parse_id(name: &str, raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{name} must be an integer id (got '{raw}')")))
}

/// Saved-city primary keys are PostgreSQL BIGSERIAL; city ids from the
/// scoring service share the same width.
pub type DbId = i64;

/// Principals are identified by the token subject, an opaque string.
pub type PrincipalId = String;

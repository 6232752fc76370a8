//! Principal profile references.
//!
//! A `profiles` row exists for every principal that owns at least one saved
//! city; `saved_cities.user_id` references `profiles.id`.

/// Identity of the principal that will own a new record.
///
/// Built from verified token claims, never from request bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRef {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl OwnerRef {
    /// Owner with only an id, for callers that have no profile details.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: None,
        }
    }
}

//! Static city id to `"City, State"` mapping.
//!
//! The table is built once at startup from a JSON object keyed by numeric
//! city id (`{"5760": "Port Charlotte, Florida", ...}`) and is read-only
//! afterwards, so it can be shared across requests behind an `Arc` without
//! locking.

use std::collections::HashMap;
use std::path::Path;

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in [`CoreError::NotFound`] for lookup misses.
pub const ENTITY_CITY: &str = "City";

/// Separator between the city and state halves of a lookup value.
const CITY_STATE_SEPARATOR: &str = ", ";

/// Errors raised while building the lookup table.
#[derive(Debug, thiserror::Error)]
pub enum CityLookupError {
    #[error("Failed to read city lookup file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("City lookup data is not a valid JSON object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("City lookup key '{0}' is not a numeric id")]
    InvalidId(String),

    #[error("City lookup entry {id} is not a single 'City, State' pair: '{value}'")]
    InvalidEntry { id: DbId, value: String },

    #[error("City lookup id {0} appears more than once")]
    DuplicateId(DbId),
}

/// Immutable mapping from city id to its `"City, State"` display string.
#[derive(Debug, Clone, Default)]
pub struct CityLookup {
    entries: HashMap<DbId, String>,
}

impl CityLookup {
    /// Build a table from `(id, "City, State")` pairs.
    ///
    /// Every value must split into exactly one non-empty city and state, and
    /// each id may appear only once.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, CityLookupError>
    where
        I: IntoIterator<Item = (DbId, S)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (id, value) in entries {
            let value = value.into();
            if split_city_state(&value).is_none() {
                return Err(CityLookupError::InvalidEntry { id, value });
            }
            if map.insert(id, value).is_some() {
                return Err(CityLookupError::DuplicateId(id));
            }
        }
        Ok(Self { entries: map })
    }

    /// Parse a JSON object whose keys are numeric ids.
    pub fn from_json_str(json: &str) -> Result<Self, CityLookupError> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;

        let mut pairs = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let id: DbId = key
                .trim()
                .parse()
                .map_err(|_| CityLookupError::InvalidId(key.clone()))?;
            pairs.push((id, value));
        }

        Self::from_entries(pairs)
    }

    /// Load the table from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, CityLookupError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CityLookupError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Resolve a city id to its `"City, State"` string.
    pub fn lookup(&self, id: DbId) -> Result<&str, CoreError> {
        self.entries
            .get(&id)
            .map(String::as_str)
            .ok_or(CoreError::NotFound {
                entity: ENTITY_CITY,
                id,
            })
    }

    /// Resolve a city id and split the result into `(city, state)`.
    pub fn lookup_parts(&self, id: DbId) -> Result<(&str, &str), CoreError> {
        let value = self.lookup(id)?;
        // Entries are validated on construction.
        Ok(split_city_state(value).unwrap_or((value, "")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `"City, State"` into its two halves.
///
/// Returns `None` unless the input holds exactly one separator with a
/// non-empty value on each side.
pub fn split_city_state(value: &str) -> Option<(&str, &str)> {
    let (city, state) = value.split_once(CITY_STATE_SEPARATOR)?;
    let (city, state) = (city.trim(), state.trim());
    if city.is_empty() || state.is_empty() || state.contains(CITY_STATE_SEPARATOR) {
        return None;
    }
    Some((city, state))
}

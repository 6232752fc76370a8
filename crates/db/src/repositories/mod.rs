//! Repository structs, one per table.

pub mod saved_city_repo;

pub use saved_city_repo::SavedCityRepo;

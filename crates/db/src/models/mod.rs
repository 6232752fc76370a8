pub mod profile;
pub mod saved_city;

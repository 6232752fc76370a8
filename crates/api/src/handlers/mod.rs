pub mod data;
pub mod saved;

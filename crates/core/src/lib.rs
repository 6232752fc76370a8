//! Domain types and pure logic shared by the CitySpire crates.
//!
//! Nothing in here performs I/O at request time: the city lookup table is
//! loaded once at startup, and the ownership and metric checks are plain
//! functions over values.

pub mod city_lookup;
pub mod error;
pub mod metrics;
pub mod ownership;
pub mod types;

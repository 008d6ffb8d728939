//! Domain data types.

pub mod config;
pub mod resource;
pub mod usage;

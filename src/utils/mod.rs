// Utility functions
pub mod error;
pub mod uploads;
pub mod validate;

pub use error::*;

//! Utility modules

pub mod memory_locator;
pub mod validation;

pub use memory_locator::*;
pub use validation::*;

//! Operator inclusion, totals and export of the final report

pub mod export;
pub mod inclusion;
pub mod summary;

pub use export::*;
pub use inclusion::*;
pub use summary::*;

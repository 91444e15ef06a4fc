//! Ledger reconstruction and debit/credit classification

pub mod classify;
pub mod reconstruct;

pub use classify::*;
pub use reconstruct::*;

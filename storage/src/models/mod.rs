//! Row models for the storage crate.

mod session_row;

pub use session_row::SessionRow;

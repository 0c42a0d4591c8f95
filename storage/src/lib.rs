//! Storage crate: session-state persistence for the dialogue engine.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – SessionRow
//! - [`session_repo`] – SessionRepository (SQLite)
//! - [`memory_store`] – MemorySessionStore (tests and ephemeral runs)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod memory_store;
mod models;
mod session_repo;
mod sqlite_pool;


pub use error::StorageError;
pub use memory_store::MemorySessionStore;
pub use models::SessionRow;
pub use session_repo::SessionRepository;
pub use sqlite_pool::SqlitePoolManager;

//! Stepwise Database Layer
//!
//! Persistence gateway for solved problems. Records are append-only: the
//! store offers `save` and newest-first reads, never update or delete.
//!
//! # Backends
//!
//! - [`SqliteSolutionStore`]: SQLite through `sqlx`, the default
//! - [`MemorySolutionStore`]: process-local, for tests and throwaway runs
//!
//! # Example
//!
//! ```rust,no_run
//! use stepwise_db::{Database, DatabaseOptions, SqliteSolutionStore, SolutionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect(&DatabaseOptions::new("sqlite://stepwise.db")).await?;
//!     db.initialize().await?;
//!
//!     let store = SqliteSolutionStore::new(db);
//!     println!("{} solutions stored", store.count().await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod schema;
pub mod store;
pub mod sqlite;
pub mod memory;

pub use database::{Database, DatabaseOptions};
pub use error::{DbError, Result};
pub use store::{SolutionStore, SharedStore};
pub use sqlite::SqliteSolutionStore;
pub use memory::MemorySolutionStore;

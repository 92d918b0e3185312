//! stepwise-common: Shared types and errors used across all Stepwise crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{ProblemType, SolutionRecord, InputMap};
pub use error::{StepwiseError, ApiError, Result};

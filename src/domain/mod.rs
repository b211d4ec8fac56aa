//! Domain types for medredact.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentName`], [`RunId`])
//! - **Error types** ([`RedactError`], [`OcrError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, RedactError>`]:
//!
//! ```rust,no_run
//! use medredact::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = medredact::config::load_config("medredact.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{OcrError, RedactError};
pub use ids::{DocumentName, RunId};
pub use result::Result;

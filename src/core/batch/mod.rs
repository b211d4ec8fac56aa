//! Batch orchestration
//!
//! This module walks the input folder and coordinates per-image processing.

pub mod coordinator;
pub mod discovery;
pub mod summary;

pub use coordinator::BatchCoordinator;
pub use discovery::discover_images;
pub use summary::{BatchError, BatchErrorType, BatchSummary, DocumentSummary, BATCH_REPORT_FILE};

//! Result type alias for medredact
//!
//! This module provides a convenient Result type alias that uses RedactError
//! as the error type.

use super::errors::RedactError;

/// Result type alias for medredact operations
///
/// # Examples
///
/// ```
/// use medredact::domain::result::Result;
/// use medredact::domain::errors::RedactError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RedactError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RedactError>;

//! Result type alias for labelfuse

use super::errors::LabelFuseError;

/// Result type alias for labelfuse operations
///
/// # Examples
///
/// ```
/// use labelfuse::domain::result::Result;
/// use labelfuse::domain::errors::LabelFuseError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(LabelFuseError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, LabelFuseError>;

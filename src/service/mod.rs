pub mod recorder;
pub mod reporting;
pub mod session;

use crate::error::AppError;

/// Trimmed value of a form field that must not be blank.
pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

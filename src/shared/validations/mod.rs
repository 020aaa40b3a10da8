use crate::shared::errors::DomainError;

/// Rejects empty or whitespace-only values with `"<label> cannot be empty."`.
pub fn require_non_blank(label: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} cannot be empty.", label)));
    }
    Ok(())
}

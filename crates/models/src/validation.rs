use thiserror::Error;

// Column widths shared by the schema and the write-side checks
pub const NAME_MAX: usize = 100;
pub const LAST_NAME_MAX: usize = 150;
pub const EMAIL_MAX: usize = 150;
pub const CODE_MAX: usize = 10;
pub const CATEGORY_NAME_MAX: usize = 50;
pub const SCHEDULE_MAX: usize = 100;
pub const URL_MAX: usize = 100;
pub const SLUG_MAX: usize = 100;

/// A field that cannot be written as given
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters, got {len}")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}

/// Rejects blank values
pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    Ok(())
}

/// Rejects values longer than `max` characters
pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, len });
    }

    Ok(())
}

pub fn optional_max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |value| max_len(field, value, max))
}

/// Non-blank and at most `max` characters
pub fn required_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    required(field, value)?;
    max_len(field, value, max)
}

//! Validation errors for `biblio-core`.
//!
//! Every variant describes input rejected before any storage call is made.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{field} must not be blank")]
  Blank { field: &'static str },

  #[error("{field} must be a whole number, got {value:?}")]
  NotNumeric { field: &'static str, value: String },

  #[error("{field} must be a positive id, got {value}")]
  NonPositiveId { field: &'static str, value: i64 },

  /// Not a calendar date in `YYYY-MM-DD` form.
  #[error("{field} is not a valid YYYY-MM-DD date: {value:?}")]
  InvalidDate { field: &'static str, value: String },
}

impl ValidationError {
  /// Name of the offending input field.
  pub fn field(&self) -> &'static str {
    match *self {
      Self::Blank { field }
      | Self::NotNumeric { field, .. }
      | Self::NonPositiveId { field, .. }
      | Self::InvalidDate { field, .. } => field,
    }
  }
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

use thiserror::Error;

use crate::domain::price::Price;

/// Regla violada al validar una entidad antes de escribirla.
///
/// Cada variante identifica el campo afectado (ver [`ValidationError::field`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{field} must not be blank")]
  Blank { field: &'static str },

  #[error("{field} must have at most {max} characters (it has {len})")]
  TooLong { field: &'static str, max: usize, len: usize },

  #[error("{field} must be within [{min}, {max}], got {value}")]
  YearOutOfRange { field: &'static str, value: i16, min: i32, max: i32 },

  #[error("first appearance ({first}) must not exceed last appearance ({last})")]
  AppearanceOrder { first: i16, last: i16 },

  #[error("price must be below 5, got {price}")]
  PriceTooHigh { price: Price },

  #[error("{field} must fit in {max} microseconds, got {micros}")]
  DurationOutOfRange { field: &'static str, micros: u128, max: i64 },

  #[error("{field} is not a valid URL: {value}")]
  InvalidUrl { field: &'static str, value: String },

  #[error("nationality must be a 2-character country code, got {value:?}")]
  InvalidNationality { value: String },
}

impl ValidationError {
  /// Campo (o par de campos) que provocó el rechazo.
  pub fn field(&self) -> &'static str {
    match self {
      ValidationError::Blank { field }
      | ValidationError::TooLong { field, .. }
      | ValidationError::YearOutOfRange { field, .. }
      | ValidationError::DurationOutOfRange { field, .. }
      | ValidationError::InvalidUrl { field, .. } => field,
      ValidationError::AppearanceOrder { .. } => "first_appearance",
      ValidationError::PriceTooHigh { .. } => "price",
      ValidationError::InvalidNationality { .. } => "nationality",
    }
  }
}

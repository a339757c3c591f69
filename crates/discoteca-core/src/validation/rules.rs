use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ValidationError;
use crate::clock::Clock;
use crate::domain::price::Price;

/// Año mínimo admitido en cualquier campo de año.
pub const MIN_YEAR: i32 = 1000;

/// El precio tiene que quedar estrictamente por debajo de este valor (5.00).
pub const PRICE_CEILING_CENTS: u32 = 500;

// Esquemas http(s)/ftp(s), host por nombre, IPv4 o IPv6 entre corchetes,
// puerto opcional y resto de la ruta sin espacios.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)^(?:https?|ftps?)://(?:[^\s:@/]+(?::[^\s:@/]*)?@)?(?:localhost|(?:[a-z0-9\x{00a1}-\x{ffff}](?:[a-z0-9\x{00a1}-\x{ffff}-]{0,61}[a-z0-9\x{00a1}-\x{ffff}])?\.)+[a-z\x{00a1}-\x{ffff}-]{2,63}\.?|\d{1,3}(?:\.\d{1,3}){3}|\[[0-9a-f:.]+\])(?::\d{1,5})?(?:[/?#]\S*)?$",
  )
  .expect("URL regex is valid")
});

pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::Blank { field });
  }
  Ok(())
}

pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
  let len = value.chars().count();
  if len > max {
    return Err(ValidationError::TooLong { field, max, len });
  }
  Ok(())
}

/// Texto obligatorio con longitud máxima.
pub fn text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
  required(field, value)?;
  max_len(field, value, max)
}

/// Texto opcional: si existe, solo se comprueba la longitud.
pub fn optional_text(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
  match value {
    Some(v) => max_len(field, v, max),
    None => Ok(()),
  }
}

/// `[MIN_YEAR, clock.current_year()]`, ambos inclusive. El límite superior se
/// evalúa ahora, no cuando se definió el esquema.
pub fn year(field: &'static str, value: i16, clock: &dyn Clock) -> Result<(), ValidationError> {
  let max = clock.current_year();
  let as_i32 = i32::from(value);
  if as_i32 < MIN_YEAR || as_i32 > max {
    return Err(ValidationError::YearOutOfRange { field, value, min: MIN_YEAR, max });
  }
  Ok(())
}

pub fn optional_year(field: &'static str, value: Option<i16>, clock: &dyn Clock) -> Result<(), ValidationError> {
  match value {
    Some(v) => year(field, v, clock),
    None => Ok(()),
  }
}

/// La duración se guarda en microsegundos con signo de 64 bits.
pub fn duration(field: &'static str, value: Duration) -> Result<(), ValidationError> {
  let micros = value.as_micros();
  if i64::try_from(micros).is_err() {
    return Err(ValidationError::DurationOutOfRange { field, micros, max: i64::MAX });
  }
  Ok(())
}

pub fn price_below_five(price: Price) -> Result<(), ValidationError> {
  if price.cents() >= PRICE_CEILING_CENTS {
    return Err(ValidationError::PriceTooHigh { price });
  }
  Ok(())
}

pub fn url(field: &'static str, value: &str) -> Result<(), ValidationError> {
  if !URL_RE.is_match(value) {
    return Err(ValidationError::InvalidUrl { field, value: value.to_string() });
  }
  Ok(())
}

pub fn nationality(value: &str) -> Result<(), ValidationError> {
  required("nationality", value)?;
  let ok = value.chars().count() == 2 && value.chars().all(|c| c.is_ascii_alphabetic());
  if !ok {
    return Err(ValidationError::InvalidNationality { value: value.to_string() });
  }
  Ok(())
}

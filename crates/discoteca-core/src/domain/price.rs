use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Precio de una canción en euros, con dos decimales exactos.
///
/// Internamente se guarda como un entero en *fixed-point* (céntimos):
///
/// - `0.00` → `0`
/// - `4.99` → `499`
/// - `99.99` → `9999`
///
/// Como máximo admite cuatro dígitos en total (dos enteros y dos decimales).
/// Que el precio sea menor que 5 es una regla de validación, no del tipo.
/// En serde viaja como céntimos; al leer pasa por [`Price::from_cents`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Price(u32);

impl Price {
  /// Factor de escala (dos decimales).
  const SCALE_FACTOR: u32 = 100;
  /// Cuatro dígitos: 99.99.
  const MAX_CENTS: u32 = 9_999;

  pub const ZERO: Price = Price(0);

  /// Construye un precio desde céntimos. `None` si excede 99.99.
  pub fn from_cents(cents: u32) -> Option<Self> {
    (cents <= Self::MAX_CENTS).then_some(Self(cents))
  }

  /// Atajo para precios enteros (`Price::from_units(5)` → 5.00).
  pub fn from_units(units: u32) -> Option<Self> {
    units.checked_mul(Self::SCALE_FACTOR).and_then(Self::from_cents)
  }

  pub fn cents(&self) -> u32 {
    self.0
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.0 / Self::SCALE_FACTOR, self.0 % Self::SCALE_FACTOR)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price: {input}")]
pub struct PriceParseError {
  pub input: String,
}

impl TryFrom<u32> for Price {
  type Error = PriceParseError;

  fn try_from(cents: u32) -> Result<Self, Self::Error> {
    Self::from_cents(cents).ok_or_else(|| PriceParseError { input: format!("{cents} cents") })
  }
}

impl From<Price> for u32 {
  fn from(price: Price) -> Self {
    price.0
  }
}

impl FromStr for Price {
  type Err = PriceParseError;

  /// Acepta `"4"`, `"4.9"` y `"4.99"`. Rechaza signos, más de dos decimales
  /// y valores por encima de 99.99.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = || PriceParseError { input: s.to_string() };
    let trimmed = s.trim();

    let (units, decimals) = match trimmed.split_once('.') {
      Some((u, d)) => (u, d),
      None => (trimmed, ""),
    };

    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if units.is_empty() || !all_digits(units) || !all_digits(decimals) || decimals.len() > 2 {
      return Err(err());
    }

    let units: u32 = units.parse().map_err(|_| err())?;
    let cents = match decimals.len() {
      0 => 0,
      1 => decimals.parse::<u32>().map_err(|_| err())? * 10,
      _ => decimals.parse::<u32>().map_err(|_| err())?,
    };

    units
      .checked_mul(Self::SCALE_FACTOR)
      .and_then(|c| c.checked_add(cents))
      .and_then(Self::from_cents)
      .ok_or_else(err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_common_forms() {
    assert_eq!("4.99".parse::<Price>().unwrap().cents(), 499);
    assert_eq!("4.9".parse::<Price>().unwrap().cents(), 490);
    assert_eq!("5".parse::<Price>().unwrap().cents(), 500);
    assert_eq!("0.00".parse::<Price>().unwrap(), Price::ZERO);
  }

  #[test]
  fn rejects_malformed_input() {
    for input in ["", ".5", "-1", "4.999", "1e2", "100.00", "4,99"] {
      assert!(input.parse::<Price>().is_err(), "{input} should not parse");
    }
  }

  #[test]
  fn displays_two_decimals() {
    assert_eq!(Price::from_cents(5).unwrap().to_string(), "0.05");
    assert_eq!(Price::from_units(5).unwrap().to_string(), "5.00");
  }

  #[test]
  fn caps_at_four_digits() {
    assert!(Price::from_cents(9_999).is_some());
    assert!(Price::from_cents(10_000).is_none());
    assert!(Price::from_units(100).is_none());
  }

  #[test]
  fn deserializing_respects_the_cap() {
    assert_eq!(serde_json::from_str::<Price>("499").unwrap().cents(), 499);
    assert_eq!(serde_json::to_string(&Price::from_cents(499).unwrap()).unwrap(), "499");

    let err = serde_json::from_str::<Price>("10000").unwrap_err();
    assert!(err.to_string().contains("10000 cents"), "{err}");
  }
}

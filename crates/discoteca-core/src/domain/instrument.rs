use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Instrumento principal de un [`Musician`](crate::domain::musician::Musician).
///
/// Conjunto cerrado: cada variante tiene un código estable (lo que se guarda
/// en la base de datos y se serializa) y una etiqueta legible (`Display`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
  #[serde(rename = "piano")]
  Piano,
  #[serde(rename = "eguitar")]
  ElectricGuitar,
  #[serde(rename = "cguitar")]
  ClassicalGuitar,
  #[serde(rename = "aguitar")]
  AcousticGuitar,
  #[serde(rename = "ebass")]
  ElectricBass,
  #[serde(rename = "bass")]
  Bass,
  #[serde(rename = "drums")]
  Drums,
  #[serde(rename = "voice")]
  Voice,
  #[serde(rename = "violin")]
  Violin,
  #[serde(rename = "harp")]
  Harp,
  #[serde(rename = "handpan")]
  Handpan,
  #[serde(rename = "tambourine")]
  Tambourine,
  #[serde(rename = "sax")]
  Saxophone,
  #[serde(rename = "trumpet")]
  Trumpet,
  #[serde(rename = "trombone")]
  Trombone,
  #[serde(rename = "flute")]
  Flute,
  #[serde(rename = "clarinet")]
  Clarinet,
  #[serde(rename = "ukulele")]
  Ukulele,
}

impl Instrument {
  pub const ALL: [Instrument; 18] = [
    Instrument::Piano,
    Instrument::ElectricGuitar,
    Instrument::ClassicalGuitar,
    Instrument::AcousticGuitar,
    Instrument::ElectricBass,
    Instrument::Bass,
    Instrument::Drums,
    Instrument::Voice,
    Instrument::Violin,
    Instrument::Harp,
    Instrument::Handpan,
    Instrument::Tambourine,
    Instrument::Saxophone,
    Instrument::Trumpet,
    Instrument::Trombone,
    Instrument::Flute,
    Instrument::Clarinet,
    Instrument::Ukulele,
  ];

  /// Código persistido.
  pub fn as_code(&self) -> &'static str {
    match self {
      Instrument::Piano => "piano",
      Instrument::ElectricGuitar => "eguitar",
      Instrument::ClassicalGuitar => "cguitar",
      Instrument::AcousticGuitar => "aguitar",
      Instrument::ElectricBass => "ebass",
      Instrument::Bass => "bass",
      Instrument::Drums => "drums",
      Instrument::Voice => "voice",
      Instrument::Violin => "violin",
      Instrument::Harp => "harp",
      Instrument::Handpan => "handpan",
      Instrument::Tambourine => "tambourine",
      Instrument::Saxophone => "sax",
      Instrument::Trumpet => "trumpet",
      Instrument::Trombone => "trombone",
      Instrument::Flute => "flute",
      Instrument::Clarinet => "clarinet",
      Instrument::Ukulele => "ukulele",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Instrument::Piano => "Piano",
      Instrument::ElectricGuitar => "Electric Guitar",
      Instrument::ClassicalGuitar => "Classical Guitar",
      Instrument::AcousticGuitar => "Acoustic Guitar",
      Instrument::ElectricBass => "Electric Bass",
      Instrument::Bass => "Bass",
      Instrument::Drums => "Drums",
      Instrument::Voice => "Voice",
      Instrument::Violin => "Violin",
      Instrument::Harp => "Harp",
      Instrument::Handpan => "Handpan",
      Instrument::Tambourine => "Tambourine",
      Instrument::Saxophone => "Saxophone",
      Instrument::Trumpet => "Trumpet",
      Instrument::Trombone => "Trombone",
      Instrument::Flute => "Flute",
      Instrument::Clarinet => "Clarinet",
      Instrument::Ukulele => "Ukulele",
    }
  }
}

impl fmt::Display for Instrument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Error producido cuando una cadena no es un código de [`Instrument`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid instrument: {input}")]
pub struct InstrumentParseError {
  pub input: String,
}

impl FromStr for Instrument {
  type Err = InstrumentParseError;

  /// Acepta solo el código persistido (sin normalizar mayúsculas: los
  /// códigos son exactamente los que guarda la base de datos).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Instrument::ALL
      .iter()
      .copied()
      .find(|i| i.as_code() == s)
      .ok_or_else(|| InstrumentParseError { input: s.to_string() })
  }
}

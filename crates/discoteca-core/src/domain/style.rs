use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Estilo musical de una canción (y preferencia de un perfil).
///
/// A diferencia de los estilos abiertos de otras taxonomías, este conjunto es
/// cerrado: no existe variante `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
  Indie,
  Pop,
  Rock,
  Funky,
  Reggaeton,
  Classic,
  Orquestra,
  Folk,
}

impl Style {
  pub const ALL: [Style; 8] = [
    Style::Indie,
    Style::Pop,
    Style::Rock,
    Style::Funky,
    Style::Reggaeton,
    Style::Classic,
    Style::Orquestra,
    Style::Folk,
  ];

  /// Código persistido; coincide con la etiqueta.
  pub fn as_code(&self) -> &'static str {
    match self {
      Style::Indie => "Indie",
      Style::Pop => "Pop",
      Style::Rock => "Rock",
      Style::Funky => "Funky",
      Style::Reggaeton => "Reggaeton",
      Style::Classic => "Classic",
      Style::Orquestra => "Orquestra",
      Style::Folk => "Folk",
    }
  }
}

impl fmt::Display for Style {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_code())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid style: {input}")]
pub struct StyleParseError {
  pub input: String,
}

impl FromStr for Style {
  type Err = StyleParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Style::ALL
      .iter()
      .copied()
      .find(|style| style.as_code() == s)
      .ok_or_else(|| StyleParseError { input: s.to_string() })
  }
}

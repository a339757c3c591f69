use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declara un identificador opaco respaldado por un UUID v4.
///
/// Todos los ids del catálogo comparten la misma forma: se generan con
/// `new()`, se convierten desde/hacia `Uuid` y se guardan como texto.
macro_rules! define_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct $name(Uuid);

    impl $name {
      /// Genera un nuevo identificador único.
      pub fn new() -> Self {
        $name(Uuid::new_v4())
      }

      pub fn from_uuid(u: Uuid) -> Self {
        $name(u)
      }

      pub fn as_uuid(&self) -> Uuid {
        self.0
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl From<Uuid> for $name {
      fn from(u: Uuid) -> Self {
        $name(u)
      }
    }

    impl From<$name> for Uuid {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl FromStr for $name {
      type Err = uuid::Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map($name)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

define_id!(
  /// Identificador de un [`Author`](crate::domain::author::Author).
  AuthorId
);

define_id!(
  /// Identificador de un [`Musician`](crate::domain::musician::Musician).
  MusicianId
);

define_id!(
  /// Identificador de un [`Album`](crate::domain::album::Album).
  AlbumId
);

define_id!(
  /// Identificador de una [`Song`](crate::domain::song::Song).
  SongId
);

define_id!(
  /// Identificador de un [`Profile`](crate::domain::profile::Profile).
  ProfileId
);

define_id!(
  /// Identificador de una cuenta de usuario.
  UserId
);

define_id!(
  /// Fila de la tabla de asociación autor ↔ músico.
  AuthorMusicianId
);

define_id!(
  /// Fila de la tabla de asociación autor ↔ canción.
  AuthorSongId
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_its_own_display() {
    let id = SongId::new();
    let parsed: SongId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
  }

  #[test]
  fn rejects_garbage() {
    assert!("not-a-uuid".parse::<AuthorId>().is_err());
  }
}

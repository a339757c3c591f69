use crate::domain::ids::AlbumId;
use serde::{Deserialize, Serialize};

/// Un álbum publicado.
///
/// Borrar un álbum borra en cascada todas sus canciones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
  pub id: AlbumId,
  pub title: String,
  /// Año de publicación; obligatorio y dentro de `[1000, año actual]`.
  pub year_of_release: i16,
  /// Productor, si se conoce.
  pub produced_by: Option<String>,
}

impl Album {
  pub fn new(title: impl Into<String>, year_of_release: i16) -> Self {
    Self { id: AlbumId::new(), title: title.into(), year_of_release, produced_by: None }
  }
}

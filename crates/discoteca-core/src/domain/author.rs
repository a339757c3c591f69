use crate::domain::ids::AuthorId;
use serde::{Deserialize, Serialize};

/// Representa a un autor (artista o grupo) dentro del catálogo.
///
/// Un autor puede firmar canciones de dos maneras independientes: como
/// autor directo de una [`Song`](crate::domain::song::Song) (`Song::author_id`)
/// o a través de la tabla de asociación autor ↔ canción. Ambas relaciones se
/// mantienen por separado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Identificador único del autor.
  pub id: AuthorId,

  /// Nombre del autor (hasta 255 caracteres).
  pub name: String,

  /// Página web oficial, si la tiene.
  pub website: Option<String>,

  /// Año de primera aparición.
  pub first_appearance: Option<i16>,

  /// Año de última aparición.
  pub last_appearance: Option<i16>,
}

impl Author {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      id: AuthorId::new(),
      name: name.into(),
      website: None,
      first_appearance: None,
      last_appearance: None,
    }
  }
}

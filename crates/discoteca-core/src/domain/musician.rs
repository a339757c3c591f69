use crate::domain::ids::{AuthorId, MusicianId};
use crate::domain::instrument::Instrument;
use serde::{Deserialize, Serialize};

/// Un músico concreto.
///
/// Tiene un autor "propietario" obligatorio (`author_id`; si el autor se
/// borra, el músico también) y, de forma independiente, puede estar asociado
/// a varios autores mediante
/// [`RelationshipAuthorMusician`](crate::domain::relationship::RelationshipAuthorMusician).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Musician {
  pub id: MusicianId,
  /// Nombre del músico (hasta 150 caracteres).
  pub name: String,
  /// Código de nacionalidad de dos letras (`"ES"`, `"DE"`...).
  pub nationality: String,
  pub instrument: Instrument,
  pub author_id: AuthorId,
}

impl Musician {
  pub fn new(
    name: impl Into<String>,
    nationality: impl Into<String>,
    instrument: Instrument,
    author_id: AuthorId,
  ) -> Self {
    Self {
      id: MusicianId::new(),
      name: name.into(),
      nationality: nationality.into(),
      instrument,
      author_id,
    }
  }
}

/// Proyección `(name, instrument)` de un músico, usada en listados filtrados
/// por relación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicianSummary {
  pub name: String,
  pub instrument: Instrument,
}

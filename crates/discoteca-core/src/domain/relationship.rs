use serde::{Deserialize, Serialize};

use crate::domain::ids::{AuthorId, AuthorMusicianId, AuthorSongId, MusicianId, SongId};

/// Asociación autor ↔ músico con un periodo de actividad opcional.
///
/// Ambos extremos se borran en cascada: si desaparece el autor o el músico,
/// desaparece la fila.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipAuthorMusician {
  pub id: AuthorMusicianId,
  pub author_id: AuthorId,
  pub musician_id: MusicianId,
  /// Año en que empezó la colaboración.
  pub start: Option<i16>,
  /// Año en que terminó.
  pub end: Option<i16>,
}

impl RelationshipAuthorMusician {
  pub fn new(author_id: AuthorId, musician_id: MusicianId) -> Self {
    Self { id: AuthorMusicianId::new(), author_id, musician_id, start: None, end: None }
  }
}

/// Asociación autor ↔ canción, sin atributos propios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipAuthorSong {
  pub id: AuthorSongId,
  pub author_id: AuthorId,
  pub song_id: SongId,
}

impl RelationshipAuthorSong {
  pub fn new(author_id: AuthorId, song_id: SongId) -> Self {
    Self { id: AuthorSongId::new(), author_id, song_id }
  }
}

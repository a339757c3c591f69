use crate::domain::{
  Album, AlbumId, Author, AuthorId, Musician, MusicianId, MusicianSummary, Profile, ProfileId,
  RelationshipAuthorMusician, RelationshipAuthorSong, Song, SongId, User, UserId,
};
use crate::validation::Validated;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  /// Violación de una restricción de unicidad (p. ej. `unique_song`).
  #[error("duplicate entry: {0}")]
  Duplicate(String),
  /// Referencia a una fila inexistente.
  #[error("constraint violation: {0}")]
  Constraint(String),
  #[error("storage error: {0}")]
  Storage(String),
}

/// Puerto de persistencia del catálogo.
///
/// Las escrituras reciben `&Validated<T>`; los `save_*` son upserts por id.
/// Las políticas de borrado (cascada / puesta a nulo) las aplica el almacén:
///
/// | se borra  | efecto                                                         |
/// |-----------|----------------------------------------------------------------|
/// | `Author`  | `Song.author_id` → `None`; sus `Musician` y filas de asociación se borran |
/// | `Album`   | sus `Song` se borran                                           |
/// | `Song`    | `Profile.preferred_song_id` → `None`; filas de asociación se borran |
/// | `Musician`| filas de asociación se borran                                  |
/// | `User`    | `Song.created_by` / `last_modified_by` → `None`; su `Profile` se borra |
pub trait CatalogRepository {
  // --- Usuarios ---
  fn save_user(&self, user: &Validated<User>) -> Result<(), RepoError>;
  fn find_user(&self, id: UserId) -> Result<Option<User>, RepoError>;
  fn delete_user(&self, id: UserId) -> Result<bool, RepoError>;

  // --- Autores ---
  fn save_author(&self, author: &Validated<Author>) -> Result<(), RepoError>;
  fn find_author(&self, id: AuthorId) -> Result<Option<Author>, RepoError>;
  fn list_authors(&self) -> Result<Vec<Author>, RepoError>;
  fn delete_author(&self, id: AuthorId) -> Result<bool, RepoError>;

  // --- Músicos ---
  fn save_musician(&self, musician: &Validated<Musician>) -> Result<(), RepoError>;
  fn find_musician(&self, id: MusicianId) -> Result<Option<Musician>, RepoError>;
  fn list_musicians(&self) -> Result<Vec<Musician>, RepoError>;
  fn delete_musician(&self, id: MusicianId) -> Result<bool, RepoError>;

  // --- Álbumes ---
  fn save_album(&self, album: &Validated<Album>) -> Result<(), RepoError>;
  fn find_album(&self, id: AlbumId) -> Result<Option<Album>, RepoError>;
  fn list_albums(&self) -> Result<Vec<Album>, RepoError>;
  fn delete_album(&self, id: AlbumId) -> Result<bool, RepoError>;

  // --- Canciones ---
  fn save_song(&self, song: &Validated<Song>) -> Result<(), RepoError>;
  fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError>;
  fn list_songs(&self) -> Result<Vec<Song>, RepoError>;
  fn delete_song(&self, id: SongId) -> Result<bool, RepoError>;

  // --- Perfiles ---
  fn save_profile(&self, profile: &Validated<Profile>) -> Result<(), RepoError>;
  fn find_profile(&self, id: ProfileId) -> Result<Option<Profile>, RepoError>;
  fn find_profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, RepoError>;
  fn delete_profile(&self, id: ProfileId) -> Result<bool, RepoError>;

  // --- Autor ↔ canción ---

  /// Inserta filas de asociación autor ↔ canción. Los pares ya existentes se
  /// ignoran y todo ocurre en una transacción: un id inexistente no deja
  /// escrituras a medias.
  fn add_author_song_links(&self, links: &[Validated<RelationshipAuthorSong>]) -> Result<(), RepoError>;
  /// Filas de asociación de la canción, ordenadas por autor.
  fn song_author_links(&self, song_id: SongId) -> Result<Vec<RelationshipAuthorSong>, RepoError>;
  /// Autores asociados a la canción, ordenados por id.
  fn song_authors(&self, song_id: SongId) -> Result<Vec<AuthorId>, RepoError>;
  fn author_songs(&self, author_id: AuthorId) -> Result<Vec<SongId>, RepoError>;

  // --- Autor ↔ músico ---

  /// Inserta (o actualiza) una fila de asociación con su periodo.
  fn link_author_musician(&self, link: &Validated<RelationshipAuthorMusician>) -> Result<(), RepoError>;
  fn author_musician_links(&self, author_id: AuthorId) -> Result<Vec<RelationshipAuthorMusician>, RepoError>;
  /// Asociación masiva; los pares existentes conservan su periodo. Mismas
  /// garantías que `add_author_song_links`.
  fn add_author_musician_links(&self, links: &[Validated<RelationshipAuthorMusician>]) -> Result<(), RepoError>;
  fn author_musicians(&self, author_id: AuthorId) -> Result<Vec<MusicianId>, RepoError>;
  /// Músicos asociados al autor, proyectados a `(name, instrument)`.
  fn musicians_for_author(&self, author_id: AuthorId) -> Result<Vec<MusicianSummary>, RepoError>;
}

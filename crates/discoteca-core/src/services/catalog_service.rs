use tracing::{debug, warn};

use crate::clock::Clock;
use crate::domain::{
  Album, AlbumId, Author, AuthorId, Musician, MusicianId, MusicianSummary, Profile, ProfileId,
  RelationshipAuthorMusician, RelationshipAuthorSong, Song, SongId, User, UserId,
};
use crate::errors::CoreError;
use crate::ports::CatalogRepository;
use crate::validation::{Validate, Validated, validate};

/// Punto de entrada de escritura del catálogo.
///
/// Cada `save_*` rellena los campos automáticos, valida con el reloj
/// inyectado y solo entonces delega en el repositorio. Una entidad inválida
/// nunca llega al almacén.
pub struct CatalogService<R, C>
where
  R: CatalogRepository,
  C: Clock,
{
  repo: R,
  clock: C,
}

impl<R, C> CatalogService<R, C>
where
  R: CatalogRepository,
  C: Clock,
{
  pub fn new(repo: R, clock: C) -> Self {
    Self { repo, clock }
  }

  pub fn repository(&self) -> &R {
    &self.repo
  }

  pub fn clock(&self) -> &C {
    &self.clock
  }

  fn checked<T: Validate>(&self, entity: T, kind: &'static str) -> Result<Validated<T>, CoreError> {
    validate(entity, &self.clock).map_err(|e| {
      warn!(kind, field = e.field(), error = %e, "rejected write");
      CoreError::from(e)
    })
  }

  // -------- COMMAND (write) --------

  pub fn save_user(&self, user: User) -> Result<User, CoreError> {
    let user = self.checked(user, "user")?;
    self.repo.save_user(&user)?;
    debug!(id = %user.id, "user saved");
    Ok(user.into_inner())
  }

  pub fn save_author(&self, author: Author) -> Result<Author, CoreError> {
    let author = self.checked(author, "author")?;
    self.repo.save_author(&author)?;
    debug!(id = %author.id, "author saved");
    Ok(author.into_inner())
  }

  pub fn save_musician(&self, musician: Musician) -> Result<Musician, CoreError> {
    let musician = self.checked(musician, "musician")?;
    self.repo.save_musician(&musician)?;
    debug!(id = %musician.id, "musician saved");
    Ok(musician.into_inner())
  }

  pub fn save_album(&self, album: Album) -> Result<Album, CoreError> {
    let album = self.checked(album, "album")?;
    self.repo.save_album(&album)?;
    debug!(id = %album.id, "album saved");
    Ok(album.into_inner())
  }

  /// Guarda la canción sellando `created` (solo la primera vez) y
  /// `last_modified` (siempre). `acting_user`, si se da, queda como
  /// `last_modified_by` y, en una canción nueva, también como `created_by`.
  pub fn save_song(&self, mut song: Song, acting_user: Option<UserId>) -> Result<Song, CoreError> {
    let now = self.clock.now();

    if song.created.is_none() {
      let stored = self.repo.find_song(song.id)?;
      match stored {
        Some(existing) => {
          song.created = existing.created;
          song.created_by = song.created_by.or(existing.created_by);
        }
        None => {
          song.created = Some(now);
          song.created_by = song.created_by.or(acting_user);
        }
      }
    }

    song.last_modified = Some(now);
    if acting_user.is_some() {
      song.last_modified_by = acting_user;
    }

    let song = self.checked(song, "song")?;
    self.repo.save_song(&song)?;
    debug!(id = %song.id, title = %song.title, "song saved");
    Ok(song.into_inner())
  }

  pub fn save_profile(&self, profile: Profile) -> Result<Profile, CoreError> {
    let profile = self.checked(profile, "profile")?;
    self.repo.save_profile(&profile)?;
    debug!(id = %profile.id, user = %profile.user_id, "profile saved");
    Ok(profile.into_inner())
  }

  pub fn link_author_musician(
    &self,
    link: RelationshipAuthorMusician,
  ) -> Result<RelationshipAuthorMusician, CoreError> {
    let link = self.checked(link, "author_musician")?;
    self.repo.link_author_musician(&link)?;
    Ok(link.into_inner())
  }

  /// Equivale a `song.authors.add(...)`: una fila de asociación por autor.
  pub fn add_song_authors(&self, song_id: SongId, author_ids: &[AuthorId]) -> Result<(), CoreError> {
    let links = author_ids
      .iter()
      .map(|&author_id| self.checked(RelationshipAuthorSong::new(author_id, song_id), "author_song"))
      .collect::<Result<Vec<_>, _>>()?;
    self.repo.add_author_song_links(&links)?;
    debug!(song = %song_id, count = links.len(), "song authors added");
    Ok(())
  }

  pub fn add_author_songs(&self, author_id: AuthorId, song_ids: &[SongId]) -> Result<(), CoreError> {
    let links = song_ids
      .iter()
      .map(|&song_id| self.checked(RelationshipAuthorSong::new(author_id, song_id), "author_song"))
      .collect::<Result<Vec<_>, _>>()?;
    self.repo.add_author_song_links(&links)?;
    debug!(author = %author_id, count = links.len(), "author songs added");
    Ok(())
  }

  pub fn add_author_musicians(&self, author_id: AuthorId, musician_ids: &[MusicianId]) -> Result<(), CoreError> {
    let links = musician_ids
      .iter()
      .map(|&musician_id| {
        self.checked(RelationshipAuthorMusician::new(author_id, musician_id), "author_musician")
      })
      .collect::<Result<Vec<_>, _>>()?;
    self.repo.add_author_musician_links(&links)?;
    debug!(author = %author_id, count = links.len(), "author musicians added");
    Ok(())
  }

  pub fn delete_user(&self, id: UserId) -> Result<(), CoreError> {
    found(self.repo.delete_user(id)?)
  }

  pub fn delete_author(&self, id: AuthorId) -> Result<(), CoreError> {
    found(self.repo.delete_author(id)?)
  }

  pub fn delete_musician(&self, id: MusicianId) -> Result<(), CoreError> {
    found(self.repo.delete_musician(id)?)
  }

  pub fn delete_album(&self, id: AlbumId) -> Result<(), CoreError> {
    found(self.repo.delete_album(id)?)
  }

  pub fn delete_song(&self, id: SongId) -> Result<(), CoreError> {
    found(self.repo.delete_song(id)?)
  }

  pub fn delete_profile(&self, id: ProfileId) -> Result<(), CoreError> {
    found(self.repo.delete_profile(id)?)
  }

  // -------- QUERY (read) --------

  pub fn get_author(&self, id: AuthorId) -> Result<Option<Author>, CoreError> {
    Ok(self.repo.find_author(id)?)
  }

  pub fn get_musician(&self, id: MusicianId) -> Result<Option<Musician>, CoreError> {
    Ok(self.repo.find_musician(id)?)
  }

  pub fn get_album(&self, id: AlbumId) -> Result<Option<Album>, CoreError> {
    Ok(self.repo.find_album(id)?)
  }

  pub fn get_song(&self, id: SongId) -> Result<Option<Song>, CoreError> {
    Ok(self.repo.find_song(id)?)
  }

  pub fn get_profile_for(&self, user_id: UserId) -> Result<Option<Profile>, CoreError> {
    Ok(self.repo.find_profile_by_user(user_id)?)
  }

  pub fn list_authors(&self) -> Result<Vec<Author>, CoreError> {
    Ok(self.repo.list_authors()?)
  }

  pub fn list_songs(&self) -> Result<Vec<Song>, CoreError> {
    Ok(self.repo.list_songs()?)
  }

  pub fn song_author_links(&self, song_id: SongId) -> Result<Vec<RelationshipAuthorSong>, CoreError> {
    Ok(self.repo.song_author_links(song_id)?)
  }

  pub fn author_musician_links(&self, author_id: AuthorId) -> Result<Vec<RelationshipAuthorMusician>, CoreError> {
    Ok(self.repo.author_musician_links(author_id)?)
  }

  pub fn song_authors(&self, song_id: SongId) -> Result<Vec<AuthorId>, CoreError> {
    Ok(self.repo.song_authors(song_id)?)
  }

  pub fn author_songs(&self, author_id: AuthorId) -> Result<Vec<SongId>, CoreError> {
    Ok(self.repo.author_songs(author_id)?)
  }

  pub fn author_musicians(&self, author_id: AuthorId) -> Result<Vec<MusicianId>, CoreError> {
    Ok(self.repo.author_musicians(author_id)?)
  }

  pub fn musicians_for_author(&self, author_id: AuthorId) -> Result<Vec<MusicianSummary>, CoreError> {
    Ok(self.repo.musicians_for_author(author_id)?)
  }
}

fn found(deleted: bool) -> Result<(), CoreError> {
  if deleted { Ok(()) } else { Err(CoreError::NotFound) }
}

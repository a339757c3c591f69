pub mod config;
mod mapping;
pub mod models;
pub mod schema;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, warn};

use discoteca_config::ConfigError;
use discoteca_core::domain::{
  Album, AlbumId, Author, AuthorId, Musician, MusicianId, MusicianSummary, Profile, ProfileId,
  RelationshipAuthorMusician, RelationshipAuthorSong, Song, SongId, User, UserId,
};
use discoteca_core::ports::{CatalogRepository, RepoError};
use discoteca_core::validation::Validated;

use crate::config::StorageConfig;
use crate::mapping::*;
use crate::models::{
  AlbumRow, AuthorMusicianRow, AuthorRow, AuthorSongRow, MusicianRow, ProfileRow, SongChangeset, SongRow, UserRow,
};
use crate::schema::{
  albums, authors, musicians, profiles, relationship_author_musician as ram, relationship_author_song as ras, songs,
  users,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const MEMORY_URL: &str = ":memory:";

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
type SqlitePooled = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Fallos al abrir la base de datos (pool, migraciones, configuración).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  #[error("connection pool: {0}")]
  Pool(#[from] r2d2::PoolError),
  #[error("migrations: {0}")]
  Migration(String),
  #[error("database: {0}")]
  Database(#[from] DieselError),
  #[error("config: {0}")]
  Config(#[from] ConfigError),
  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl From<StorageError> for RepoError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::Database(e) => map_db_error(e),
      other => RepoError::Storage(other.to_string()),
    }
  }
}

/// Traduce los errores de diesel al vocabulario del puerto.
pub fn map_db_error(err: DieselError) -> RepoError {
  match err {
    DieselError::NotFound => RepoError::NotFound,
    DieselError::DatabaseError(kind, info) => match kind {
      DatabaseErrorKind::UniqueViolation => RepoError::Duplicate(info.message().to_string()),
      DatabaseErrorKind::ForeignKeyViolation
      | DatabaseErrorKind::CheckViolation
      | DatabaseErrorKind::NotNullViolation => RepoError::Constraint(info.message().to_string()),
      _ => RepoError::Storage(info.message().to_string()),
    },
    other => RepoError::Storage(other.to_string()),
  }
}

/// PRAGMAs aplicados a cada conexión nueva del pool.
///
/// SQLite trae las claves foráneas desactivadas por defecto; sin
/// `foreign_keys = ON` no habría ni cascadas ni puestas a nulo.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: Option<String>,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
    let mut pragmas = String::from("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;");
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(r2d2::Error::QueryError)
  }
}

/// Solo se aceptan nombres de modo (`WAL`, `DELETE`...): el valor acaba
/// interpolado en un PRAGMA.
fn sanitize_journal_mode(mode: Option<String>) -> Option<String> {
  mode.filter(|m| {
    let ok = !m.is_empty() && m.chars().all(|c| c.is_ascii_alphabetic());
    if !ok {
      warn!(journal_mode = %m, "ignoring invalid journal_mode");
    }
    ok
  })
}

/// Implementación SQLite de [`CatalogRepository`].
pub struct SqliteCatalogRepository {
  pool: SqlitePool,
}

impl SqliteCatalogRepository {
  /// Abre (o crea) la base de datos en `database_url` y aplica las migraciones
  /// pendientes.
  pub fn new(database_url: &str) -> Result<Self, StorageError> {
    Self::open(database_url, None, 4)
  }

  /// Base de datos en memoria con una única conexión persistente.
  pub fn in_memory() -> Result<Self, StorageError> {
    Self::open(MEMORY_URL, None, 1)
  }

  pub fn with_config(cfg: &StorageConfig) -> Result<Self, StorageError> {
    if let Some(parent) = cfg.db_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    Self::open(&cfg.database_url(), cfg.journal_mode.clone(), cfg.pool_size)
  }

  /// Usa la sección `[storage]` del archivo de configuración global.
  pub fn new_from_config() -> Result<Self, StorageError> {
    let cfg = StorageConfig::load()?;
    Self::with_config(&cfg)
  }

  fn open(database_url: &str, journal_mode: Option<String>, pool_size: u32) -> Result<Self, StorageError> {
    let journal_mode = sanitize_journal_mode(journal_mode);
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let mut builder = Pool::builder()
      .max_size(pool_size.max(1))
      .connection_customizer(Box::new(ConnectionOptions { journal_mode }));

    // Cada conexión a `:memory:` es una base distinta: una sola, sin caducar.
    if database_url == MEMORY_URL {
      builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    }

    let pool = builder.build(manager)?;

    let mut conn = pool.get()?;
    let applied = conn
      .run_pending_migrations(MIGRATIONS)
      .map_err(|e| StorageError::Migration(e.to_string()))?;
    info!(database_url, migrations = applied.len(), "catalog database ready");

    Ok(Self { pool })
  }

  fn conn(&self) -> Result<SqlitePooled, RepoError> {
    self.pool.get().map_err(|e| RepoError::Storage(format!("connection pool: {e}")))
  }
}

/// Inserta un lote de enlaces en una sola transacción `IMMEDIATE`; los pares
/// ya presentes se ignoran. Devuelve cuántas filas se crearon.
fn insert_author_song_links(
  conn: &mut SqliteConnection,
  links: &[Validated<RelationshipAuthorSong>],
) -> Result<usize, RepoError> {
  conn
    .immediate_transaction::<_, DieselError, _>(|conn| {
      let mut inserted = 0;
      for link in links {
        inserted += diesel::insert_into(ras::table)
          .values(&author_song_to_row(link))
          .on_conflict((ras::author_id, ras::song_id))
          .do_nothing()
          .execute(conn)?;
      }
      Ok(inserted)
    })
    .map_err(map_db_error)
}

impl CatalogRepository for SqliteCatalogRepository {
  // -------- users --------

  fn save_user(&self, user: &Validated<User>) -> Result<(), RepoError> {
    let row = user_to_row(user);
    let mut conn = self.conn()?;

    diesel::insert_into(users::table)
      .values(&row)
      .on_conflict(users::id)
      .do_update()
      .set(&row)
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn find_user(&self, user_id: UserId) -> Result<Option<User>, RepoError> {
    let mut conn = self.conn()?;

    users::table
      .find(user_id.to_string())
      .select(UserRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_user)
      .transpose()
  }

  fn delete_user(&self, user_id: UserId) -> Result<bool, RepoError> {
    let mut conn = self.conn()?;
    let n = diesel::delete(users::table.find(user_id.to_string()))
      .execute(&mut conn)
      .map_err(map_db_error)?;
    Ok(n > 0)
  }

  // -------- authors --------

  fn save_author(&self, author: &Validated<Author>) -> Result<(), RepoError> {
    let row = author_to_row(author);
    let mut conn = self.conn()?;

    diesel::insert_into(authors::table)
      .values(&row)
      .on_conflict(authors::id)
      .do_update()
      .set(&row)
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn find_author(&self, author_id: AuthorId) -> Result<Option<Author>, RepoError> {
    let mut conn = self.conn()?;

    authors::table
      .find(author_id.to_string())
      .select(AuthorRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_author)
      .transpose()
  }

  fn list_authors(&self) -> Result<Vec<Author>, RepoError> {
    let mut conn = self.conn()?;

    let rows = authors::table
      .select(AuthorRow::as_select())
      .order((authors::name.asc(), authors::id.asc()))
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows.into_iter().map(row_to_author).collect()
  }

  fn delete_author(&self, author_id: AuthorId) -> Result<bool, RepoError> {
    let mut conn = self.conn()?;
    let n = diesel::delete(authors::table.find(author_id.to_string()))
      .execute(&mut conn)
      .map_err(map_db_error)?;
    Ok(n > 0)
  }

  // -------- musicians --------

  fn save_musician(&self, musician: &Validated<Musician>) -> Result<(), RepoError> {
    let row = musician_to_row(musician);
    let mut conn = self.conn()?;

    diesel::insert_into(musicians::table)
      .values(&row)
      .on_conflict(musicians::id)
      .do_update()
      .set(&row)
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn find_musician(&self, musician_id: MusicianId) -> Result<Option<Musician>, RepoError> {
    let mut conn = self.conn()?;

    musicians::table
      .find(musician_id.to_string())
      .select(MusicianRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_musician)
      .transpose()
  }

  fn list_musicians(&self) -> Result<Vec<Musician>, RepoError> {
    let mut conn = self.conn()?;

    let rows = musicians::table
      .select(MusicianRow::as_select())
      .order((musicians::name.asc(), musicians::id.asc()))
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows.into_iter().map(row_to_musician).collect()
  }

  fn delete_musician(&self, musician_id: MusicianId) -> Result<bool, RepoError> {
    let mut conn = self.conn()?;
    let n = diesel::delete(musicians::table.find(musician_id.to_string()))
      .execute(&mut conn)
      .map_err(map_db_error)?;
    Ok(n > 0)
  }

  // -------- albums --------

  fn save_album(&self, album: &Validated<Album>) -> Result<(), RepoError> {
    let row = album_to_row(album);
    let mut conn = self.conn()?;

    diesel::insert_into(albums::table)
      .values(&row)
      .on_conflict(albums::id)
      .do_update()
      .set(&row)
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn find_album(&self, album_id: AlbumId) -> Result<Option<Album>, RepoError> {
    let mut conn = self.conn()?;

    albums::table
      .find(album_id.to_string())
      .select(AlbumRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_album)
      .transpose()
  }

  fn list_albums(&self) -> Result<Vec<Album>, RepoError> {
    let mut conn = self.conn()?;

    let rows = albums::table
      .select(AlbumRow::as_select())
      .order((albums::year_of_release.asc(), albums::title.asc(), albums::id.asc()))
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows.into_iter().map(row_to_album).collect()
  }

  fn delete_album(&self, album_id: AlbumId) -> Result<bool, RepoError> {
    let mut conn = self.conn()?;
    let n = diesel::delete(albums::table.find(album_id.to_string()))
      .execute(&mut conn)
      .map_err(map_db_error)?;
    Ok(n > 0)
  }

  // -------- songs --------

  fn save_song(&self, song: &Validated<Song>) -> Result<(), RepoError> {
    let row = song_to_row(song)?;
    let mut conn = self.conn()?;

    diesel::insert_into(songs::table)
      .values(&row)
      .on_conflict(songs::id)
      .do_update()
      .set(SongChangeset::from(&row))
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn find_song(&self, song_id: SongId) -> Result<Option<Song>, RepoError> {
    let mut conn = self.conn()?;

    songs::table
      .find(song_id.to_string())
      .select(SongRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_song)
      .transpose()
  }

  fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    let mut conn = self.conn()?;

    let rows = songs::table
      .select(SongRow::as_select())
      .order((songs::title.asc(), songs::id.asc()))
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows.into_iter().map(row_to_song).collect()
  }

  fn delete_song(&self, song_id: SongId) -> Result<bool, RepoError> {
    let mut conn = self.conn()?;
    let n = diesel::delete(songs::table.find(song_id.to_string()))
      .execute(&mut conn)
      .map_err(map_db_error)?;
    Ok(n > 0)
  }

  // -------- profiles --------

  fn save_profile(&self, profile: &Validated<Profile>) -> Result<(), RepoError> {
    let row = profile_to_row(profile);
    let mut conn = self.conn()?;

    diesel::insert_into(profiles::table)
      .values(&row)
      .on_conflict(profiles::id)
      .do_update()
      .set(&row)
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn find_profile(&self, profile_id: ProfileId) -> Result<Option<Profile>, RepoError> {
    let mut conn = self.conn()?;

    profiles::table
      .find(profile_id.to_string())
      .select(ProfileRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_profile)
      .transpose()
  }

  fn find_profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, RepoError> {
    let mut conn = self.conn()?;

    profiles::table
      .filter(profiles::user_id.eq(user_id.to_string()))
      .select(ProfileRow::as_select())
      .first(&mut conn)
      .optional()
      .map_err(map_db_error)?
      .map(row_to_profile)
      .transpose()
  }

  fn delete_profile(&self, profile_id: ProfileId) -> Result<bool, RepoError> {
    let mut conn = self.conn()?;
    let n = diesel::delete(profiles::table.find(profile_id.to_string()))
      .execute(&mut conn)
      .map_err(map_db_error)?;
    Ok(n > 0)
  }

  // -------- author ↔ song --------

  fn add_author_song_links(&self, links: &[Validated<RelationshipAuthorSong>]) -> Result<(), RepoError> {
    let mut conn = self.conn()?;
    let inserted = insert_author_song_links(&mut conn, links)?;

    debug!(requested = links.len(), inserted, "author/song links added");
    Ok(())
  }

  fn song_author_links(&self, song_id: SongId) -> Result<Vec<RelationshipAuthorSong>, RepoError> {
    let mut conn = self.conn()?;

    let rows = ras::table
      .filter(ras::song_id.eq(song_id.to_string()))
      .select(AuthorSongRow::as_select())
      .order(ras::author_id.asc())
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows.into_iter().map(row_to_author_song).collect()
  }

  fn song_authors(&self, song_id: SongId) -> Result<Vec<AuthorId>, RepoError> {
    let mut conn = self.conn()?;

    let ids: Vec<String> = ras::table
      .filter(ras::song_id.eq(song_id.to_string()))
      .select(ras::author_id)
      .order(ras::author_id.asc())
      .load(&mut conn)
      .map_err(map_db_error)?;

    ids.iter().map(|raw| parse("relationship_author_song.author_id", raw)).collect()
  }

  fn author_songs(&self, author_id: AuthorId) -> Result<Vec<SongId>, RepoError> {
    let mut conn = self.conn()?;

    let ids: Vec<String> = ras::table
      .filter(ras::author_id.eq(author_id.to_string()))
      .select(ras::song_id)
      .order(ras::song_id.asc())
      .load(&mut conn)
      .map_err(map_db_error)?;

    ids.iter().map(|raw| parse("relationship_author_song.song_id", raw)).collect()
  }

  // -------- author ↔ musician --------

  /// Un par autor/músico aparece una sola vez: volver a enlazarlo
  /// actualiza el periodo de la fila existente (que conserva su id).
  fn link_author_musician(&self, link: &Validated<RelationshipAuthorMusician>) -> Result<(), RepoError> {
    let row = author_musician_to_row(link);
    let mut conn = self.conn()?;

    diesel::insert_into(ram::table)
      .values(&row)
      .on_conflict((ram::author_id, ram::musician_id))
      .do_update()
      .set((ram::start_year.eq(excluded(ram::start_year)), ram::end_year.eq(excluded(ram::end_year))))
      .execute(&mut conn)
      .map_err(map_db_error)?;

    Ok(())
  }

  fn author_musician_links(&self, author_id: AuthorId) -> Result<Vec<RelationshipAuthorMusician>, RepoError> {
    let mut conn = self.conn()?;

    let rows = ram::table
      .filter(ram::author_id.eq(author_id.to_string()))
      .select(AuthorMusicianRow::as_select())
      .order(ram::musician_id.asc())
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows.into_iter().map(row_to_author_musician).collect()
  }

  fn add_author_musician_links(&self, links: &[Validated<RelationshipAuthorMusician>]) -> Result<(), RepoError> {
    let mut conn = self.conn()?;

    let inserted = conn
      .immediate_transaction::<_, DieselError, _>(|conn| {
        let mut inserted = 0;
        for link in links {
          inserted += diesel::insert_into(ram::table)
            .values(&author_musician_to_row(link))
            .on_conflict((ram::author_id, ram::musician_id))
            .do_nothing()
            .execute(conn)?;
        }
        Ok(inserted)
      })
      .map_err(map_db_error)?;

    debug!(requested = links.len(), inserted, "author/musician links added");
    Ok(())
  }

  fn author_musicians(&self, author_id: AuthorId) -> Result<Vec<MusicianId>, RepoError> {
    let mut conn = self.conn()?;

    let ids: Vec<String> = ram::table
      .filter(ram::author_id.eq(author_id.to_string()))
      .select(ram::musician_id)
      .order(ram::musician_id.asc())
      .load(&mut conn)
      .map_err(map_db_error)?;

    ids.iter().map(|raw| parse("relationship_author_musician.musician_id", raw)).collect()
  }

  fn musicians_for_author(&self, author_id: AuthorId) -> Result<Vec<MusicianSummary>, RepoError> {
    let mut conn = self.conn()?;

    let rows: Vec<(String, String)> = musicians::table
      .inner_join(ram::table)
      .filter(ram::author_id.eq(author_id.to_string()))
      .select((musicians::name, musicians::instrument))
      .order((musicians::name.asc(), musicians::id.asc()))
      .load(&mut conn)
      .map_err(map_db_error)?;

    rows
      .into_iter()
      .map(|(name, instrument)| {
        Ok(MusicianSummary { name, instrument: parse("musicians.instrument", &instrument)? })
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn journal_mode_must_be_a_bare_word() {
    assert_eq!(sanitize_journal_mode(Some("WAL".into())).as_deref(), Some("WAL"));
    assert_eq!(sanitize_journal_mode(Some("WAL; DROP TABLE songs".into())), None);
    assert_eq!(sanitize_journal_mode(Some(String::new())), None);
    assert_eq!(sanitize_journal_mode(None), None);
  }

  #[test]
  fn in_memory_database_is_migrated() {
    let repo = SqliteCatalogRepository::in_memory().unwrap();
    assert!(repo.list_authors().unwrap().is_empty());
    assert!(repo.list_songs().unwrap().is_empty());
  }

  #[test]
  fn unknown_ids_are_not_found() {
    let repo = SqliteCatalogRepository::in_memory().unwrap();

    assert!(repo.find_song(SongId::new()).unwrap().is_none());
    assert!(!repo.delete_album(AlbumId::new()).unwrap());
  }
}

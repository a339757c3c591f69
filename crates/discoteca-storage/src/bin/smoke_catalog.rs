//! Recorre las consultas de ejemplo del catálogo contra un archivo SQLite.
//!
//! Uso: `cargo run -p discoteca-storage --features cli --bin smoke_catalog [ruta.db]`.
//! Sin argumento usa la configuración `[storage]` de `discoteca.toml`.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use discoteca_core::domain::{Album, Author, Instrument, Musician, Song};
use discoteca_core::services::CatalogService;
use discoteca_core::SystemClock;
use discoteca_storage::SqliteCatalogRepository;

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let repo = match std::env::args().nth(1) {
    Some(path) => SqliteCatalogRepository::new(&path),
    None => SqliteCatalogRepository::new_from_config(),
  }
  .context("failed to open catalog database")?;

  let catalog = CatalogService::new(repo, SystemClock);

  let album = catalog.save_album(Album::new("Smoke Sessions", 2020))?;
  let author_a = catalog.save_author(Author::new("Ana Torres"))?;
  let author_b = catalog.save_author(Author::new("Bruno Díaz"))?;

  let mut song = Song::new("smoke.mp3", "Smoke Test", Duration::from_secs(201));
  song.album_id = Some(album.id);
  let song = catalog.save_song(song, None)?;

  // 1. Una canción recibe varios autores.
  catalog.add_song_authors(song.id, &[author_a.id, author_b.id])?;
  info!(song = %song.title, authors = ?catalog.song_authors(song.id)?, "song authors");

  // 2. Un autor recibe varias canciones.
  let mut other = Song::new("smoke-2.mp3", "Smoke Test II", Duration::from_secs(187));
  other.album_id = Some(album.id);
  let other = catalog.save_song(other, None)?;
  catalog.add_author_songs(author_a.id, &[song.id, other.id])?;
  info!(author = %author_a.name, songs = ?catalog.author_songs(author_a.id)?, "author songs");

  // 3. Un autor recibe varios músicos.
  let pianist = catalog.save_musician(Musician::new("Clara", "ES", Instrument::Piano, author_a.id))?;
  let drummer = catalog.save_musician(Musician::new("Dario", "IT", Instrument::Drums, author_a.id))?;
  catalog.add_author_musicians(author_b.id, &[pianist.id, drummer.id])?;

  // 4. Músicos de un autor, proyectados a (name, instrument).
  for summary in catalog.musicians_for_author(author_b.id)? {
    info!(name = %summary.name, instrument = %summary.instrument, "musician");
  }

  catalog.delete_album(album.id)?;
  catalog.delete_author(author_a.id)?;
  catalog.delete_author(author_b.id)?;
  info!("smoke run finished, sample rows removed");

  Ok(())
}

//! Conversión entre filas de la base de datos y entidades del dominio.
//!
//! Los ids se guardan como texto UUID, las duraciones en microsegundos, el
//! precio en céntimos, las horas como `HH:MM:SS` y las marcas de tiempo en
//! RFC 3339 (UTC, microsegundos). Una fila que no encaja en el dominio se
//! reporta como `RepoError::Storage`, nunca con un pánico.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};

use discoteca_core::domain::{
  Album, Author, Musician, Price, Profile, RelationshipAuthorMusician, RelationshipAuthorSong, Song, User,
};
use discoteca_core::ports::RepoError;

use crate::models::{
  AlbumRow, AuthorMusicianRow, AuthorRow, AuthorSongRow, MusicianRow, ProfileRow, SongRow, UserRow,
};

const TIME_FORMAT: &str = "%H:%M:%S";

fn corrupt(column: &str, raw: impl Display, err: impl Display) -> RepoError {
  RepoError::Storage(format!("invalid {column} in database ({raw}): {err}"))
}

pub(crate) fn parse<T>(column: &str, raw: &str) -> Result<T, RepoError>
where
  T: FromStr,
  T::Err: Display,
{
  raw.parse().map_err(|e| corrupt(column, raw, e))
}

fn parse_opt<T>(column: &str, raw: Option<String>) -> Result<Option<T>, RepoError>
where
  T: FromStr,
  T::Err: Display,
{
  raw.map(|r| parse(column, &r)).transpose()
}

fn opt_string<T: ToString>(value: Option<T>) -> Option<String> {
  value.map(|v| v.to_string())
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, RepoError> {
  DateTime::parse_from_rfc3339(raw)
    .map(|at| at.with_timezone(&Utc))
    .map_err(|e| corrupt(column, raw, e))
}

fn format_time(t: NaiveTime) -> String {
  t.format(TIME_FORMAT).to_string()
}

fn parse_time(column: &str, raw: &str) -> Result<NaiveTime, RepoError> {
  NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|e| corrupt(column, raw, e))
}

// -------- users --------

pub(crate) fn user_to_row(user: &User) -> UserRow {
  UserRow { id: user.id.to_string(), username: user.username.clone() }
}

pub(crate) fn row_to_user(row: UserRow) -> Result<User, RepoError> {
  Ok(User { id: parse("users.id", &row.id)?, username: row.username })
}

// -------- authors --------

pub(crate) fn author_to_row(author: &Author) -> AuthorRow {
  AuthorRow {
    id: author.id.to_string(),
    name: author.name.clone(),
    website: author.website.clone(),
    first_appearance: author.first_appearance,
    last_appearance: author.last_appearance,
  }
}

pub(crate) fn row_to_author(row: AuthorRow) -> Result<Author, RepoError> {
  Ok(Author {
    id: parse("authors.id", &row.id)?,
    name: row.name,
    website: row.website,
    first_appearance: row.first_appearance,
    last_appearance: row.last_appearance,
  })
}

// -------- musicians --------

pub(crate) fn musician_to_row(musician: &Musician) -> MusicianRow {
  MusicianRow {
    id: musician.id.to_string(),
    name: musician.name.clone(),
    nationality: musician.nationality.clone(),
    instrument: musician.instrument.as_code().to_string(),
    author_id: musician.author_id.to_string(),
  }
}

pub(crate) fn row_to_musician(row: MusicianRow) -> Result<Musician, RepoError> {
  Ok(Musician {
    id: parse("musicians.id", &row.id)?,
    name: row.name,
    nationality: row.nationality,
    instrument: parse("musicians.instrument", &row.instrument)?,
    author_id: parse("musicians.author_id", &row.author_id)?,
  })
}

// -------- albums --------

pub(crate) fn album_to_row(album: &Album) -> AlbumRow {
  AlbumRow {
    id: album.id.to_string(),
    title: album.title.clone(),
    year_of_release: album.year_of_release,
    produced_by: album.produced_by.clone(),
  }
}

pub(crate) fn row_to_album(row: AlbumRow) -> Result<Album, RepoError> {
  Ok(Album {
    id: parse("albums.id", &row.id)?,
    title: row.title,
    year_of_release: row.year_of_release,
    produced_by: row.produced_by,
  })
}

// -------- songs --------

/// `created` ausente se sella con la hora actual; el upsert nunca reescribe
/// `created_at`, así que solo cuenta en la primera inserción.
///
/// Una duración que no cabe en `i64` microsegundos es `RepoError::Constraint`.
pub(crate) fn song_to_row(song: &Song) -> Result<SongRow, RepoError> {
  let now = Utc::now();
  let micros = song.duration.as_micros();
  let duration_us = i64::try_from(micros)
    .map_err(|_| RepoError::Constraint(format!("songs.duration_us out of range: {micros} µs")))?;

  Ok(SongRow {
    id: song.id.to_string(),
    audio: song.audio.clone(),
    title: song.title.clone(),
    author_id: opt_string(song.author_id),
    album_id: opt_string(song.album_id),
    duration_us,
    style: song.style.map(|s| s.as_code().to_string()),
    playbacks: song.playbacks.map(i64::from),
    price_cents: i32::try_from(song.price.cents()).unwrap_or(i32::MAX),
    deal_of_the_day: song.deal_of_the_day,
    created_at: format_timestamp(song.created.unwrap_or(now)),
    created_by: opt_string(song.created_by),
    updated_at: format_timestamp(song.last_modified.unwrap_or(now)),
    updated_by: opt_string(song.last_modified_by),
  })
}

pub(crate) fn row_to_song(row: SongRow) -> Result<Song, RepoError> {
  let duration_us =
    u64::try_from(row.duration_us).map_err(|e| corrupt("songs.duration_us", row.duration_us, e))?;
  let playbacks = row
    .playbacks
    .map(|p| u32::try_from(p).map_err(|e| corrupt("songs.playbacks", p, e)))
    .transpose()?;
  let price = u32::try_from(row.price_cents)
    .ok()
    .and_then(Price::from_cents)
    .ok_or_else(|| corrupt("songs.price_cents", row.price_cents, "out of range"))?;

  Ok(Song {
    id: parse("songs.id", &row.id)?,
    audio: row.audio,
    title: row.title,
    author_id: parse_opt("songs.author_id", row.author_id)?,
    album_id: parse_opt("songs.album_id", row.album_id)?,
    duration: Duration::from_micros(duration_us),
    style: parse_opt("songs.style", row.style)?,
    playbacks,
    price,
    deal_of_the_day: row.deal_of_the_day,
    created: Some(parse_timestamp("songs.created_at", &row.created_at)?),
    created_by: parse_opt("songs.created_by", row.created_by)?,
    last_modified: Some(parse_timestamp("songs.updated_at", &row.updated_at)?),
    last_modified_by: parse_opt("songs.updated_by", row.updated_by)?,
  })
}

// -------- profiles --------

pub(crate) fn profile_to_row(profile: &Profile) -> ProfileRow {
  ProfileRow {
    id: profile.id.to_string(),
    user_id: profile.user_id.to_string(),
    daily_start_time: format_time(profile.daily_start_time),
    daily_finish_time: format_time(profile.daily_finish_time),
    preferred_style: profile.preferred_style.as_code().to_string(),
    preferred_song_id: opt_string(profile.preferred_song_id),
  }
}

pub(crate) fn row_to_profile(row: ProfileRow) -> Result<Profile, RepoError> {
  Ok(Profile {
    id: parse("profiles.id", &row.id)?,
    user_id: parse("profiles.user_id", &row.user_id)?,
    daily_start_time: parse_time("profiles.daily_start_time", &row.daily_start_time)?,
    daily_finish_time: parse_time("profiles.daily_finish_time", &row.daily_finish_time)?,
    preferred_style: parse("profiles.preferred_style", &row.preferred_style)?,
    preferred_song_id: parse_opt("profiles.preferred_song_id", row.preferred_song_id)?,
  })
}

// -------- author ↔ musician --------

pub(crate) fn author_musician_to_row(link: &RelationshipAuthorMusician) -> AuthorMusicianRow {
  AuthorMusicianRow {
    id: link.id.to_string(),
    author_id: link.author_id.to_string(),
    musician_id: link.musician_id.to_string(),
    start_year: link.start,
    end_year: link.end,
  }
}

pub(crate) fn row_to_author_musician(row: AuthorMusicianRow) -> Result<RelationshipAuthorMusician, RepoError> {
  Ok(RelationshipAuthorMusician {
    id: parse("relationship_author_musician.id", &row.id)?,
    author_id: parse("relationship_author_musician.author_id", &row.author_id)?,
    musician_id: parse("relationship_author_musician.musician_id", &row.musician_id)?,
    start: row.start_year,
    end: row.end_year,
  })
}

// -------- author ↔ song --------

pub(crate) fn author_song_to_row(link: &RelationshipAuthorSong) -> AuthorSongRow {
  AuthorSongRow { id: link.id.to_string(), author_id: link.author_id.to_string(), song_id: link.song_id.to_string() }
}

pub(crate) fn row_to_author_song(row: AuthorSongRow) -> Result<RelationshipAuthorSong, RepoError> {
  Ok(RelationshipAuthorSong {
    id: parse("relationship_author_song.id", &row.id)?,
    author_id: parse("relationship_author_song.author_id", &row.author_id)?,
    song_id: parse("relationship_author_song.song_id", &row.song_id)?,
  })
}

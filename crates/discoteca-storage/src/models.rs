use crate::schema::{
  albums, authors, musicians, profiles, relationship_author_musician, relationship_author_song, songs, users,
};

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users, check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
  pub id: String,
  pub username: String,
}

#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = authors, check_for_backend(diesel::sqlite::Sqlite), treat_none_as_null = true)]
pub struct AuthorRow {
  pub id: String,
  pub name: String,
  pub website: Option<String>,
  pub first_appearance: Option<i16>,
  pub last_appearance: Option<i16>,
}

#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = musicians, check_for_backend(diesel::sqlite::Sqlite))]
pub struct MusicianRow {
  pub id: String,
  pub name: String,
  pub nationality: String,
  pub instrument: String,
  pub author_id: String,
}

#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = albums, check_for_backend(diesel::sqlite::Sqlite), treat_none_as_null = true)]
pub struct AlbumRow {
  pub id: String,
  pub title: String,
  pub year_of_release: i16,
  pub produced_by: Option<String>,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = songs, check_for_backend(diesel::sqlite::Sqlite))]
pub struct SongRow {
  pub id: String,
  pub audio: String,
  pub title: String,
  pub author_id: Option<String>,
  pub album_id: Option<String>,
  pub duration_us: i64,
  pub style: Option<String>,
  pub playbacks: Option<i64>,
  pub price_cents: i32,
  pub deal_of_the_day: bool,
  pub created_at: String,
  pub created_by: Option<String>,
  pub updated_at: String,
  pub updated_by: Option<String>,
}

/// Columnas que un upsert puede reescribir: todo salvo `id` y `created_at`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = songs, treat_none_as_null = true)]
pub struct SongChangeset<'a> {
  pub audio: &'a str,
  pub title: &'a str,
  pub author_id: Option<&'a str>,
  pub album_id: Option<&'a str>,
  pub duration_us: i64,
  pub style: Option<&'a str>,
  pub playbacks: Option<i64>,
  pub price_cents: i32,
  pub deal_of_the_day: bool,
  pub created_by: Option<&'a str>,
  pub updated_at: &'a str,
  pub updated_by: Option<&'a str>,
}

impl<'a> From<&'a SongRow> for SongChangeset<'a> {
  fn from(row: &'a SongRow) -> Self {
    SongChangeset {
      audio: &row.audio,
      title: &row.title,
      author_id: row.author_id.as_deref(),
      album_id: row.album_id.as_deref(),
      duration_us: row.duration_us,
      style: row.style.as_deref(),
      playbacks: row.playbacks,
      price_cents: row.price_cents,
      deal_of_the_day: row.deal_of_the_day,
      created_by: row.created_by.as_deref(),
      updated_at: &row.updated_at,
      updated_by: row.updated_by.as_deref(),
    }
  }
}

#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = profiles, check_for_backend(diesel::sqlite::Sqlite), treat_none_as_null = true)]
pub struct ProfileRow {
  pub id: String,
  pub user_id: String,
  pub daily_start_time: String,
  pub daily_finish_time: String,
  pub preferred_style: String,
  pub preferred_song_id: Option<String>,
}

#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(
  table_name = relationship_author_musician,
  check_for_backend(diesel::sqlite::Sqlite),
  treat_none_as_null = true
)]
pub struct AuthorMusicianRow {
  pub id: String,
  pub author_id: String,
  pub musician_id: String,
  pub start_year: Option<i16>,
  pub end_year: Option<i16>,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = relationship_author_song, check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuthorSongRow {
  pub id: String,
  pub author_id: String,
  pub song_id: String,
}

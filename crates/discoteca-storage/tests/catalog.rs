use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use discoteca_core::domain::{
  Album, AlbumId, Author, AuthorId, Instrument, Musician, Price, Profile, RelationshipAuthorMusician, Song, Style,
  User,
};
use discoteca_core::ports::{CatalogRepository, RepoError};
use discoteca_core::services::CatalogService;
use discoteca_core::{CoreError, FixedClock, ValidationError};
use discoteca_storage::SqliteCatalogRepository;

type Catalog = CatalogService<SqliteCatalogRepository, FixedClock>;

struct TestDb {
  _dir: TempDir,
  path: PathBuf,
}

impl TestDb {
  fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    TestDb { _dir: dir, path }
  }

  fn catalog_at(&self, clock: FixedClock) -> Catalog {
    open(&self.path, clock)
  }

  fn catalog(&self) -> Catalog {
    self.catalog_at(FixedClock::at_year(2024).unwrap())
  }
}

fn open(path: &Path, clock: FixedClock) -> Catalog {
  let repo = SqliteCatalogRepository::new(path.to_str().unwrap()).unwrap();
  CatalogService::new(repo, clock)
}

fn song_in(album: &Album, title: &str, secs: u64) -> Song {
  let mut song = Song::new(&format!("{title}.mp3"), title, Duration::from_secs(secs));
  song.album_id = Some(album.id);
  song
}

fn validation_error(result: Result<impl std::fmt::Debug, CoreError>) -> ValidationError {
  match result {
    Err(CoreError::Validation(e)) => e,
    other => panic!("expected a validation error, got {other:?}"),
  }
}

// -------- validation on the write path --------

#[test]
fn inverted_appearance_years_are_not_persisted() {
  let db = TestDb::new();
  let catalog = db.catalog();

  let mut author = Author::new("Late Bloomer");
  author.first_appearance = Some(2010);
  author.last_appearance = Some(2000);
  let id = author.id;

  let err = validation_error(catalog.save_author(author));
  assert_eq!(err, ValidationError::AppearanceOrder { first: 2010, last: 2000 });
  assert!(catalog.get_author(id).unwrap().is_none());

  let mut author = Author::new("Steady");
  author.first_appearance = Some(2000);
  author.last_appearance = Some(2000);
  assert!(catalog.save_author(author).is_ok());
}

#[test]
fn year_bounds_follow_the_injected_clock() {
  let db = TestDb::new();
  let catalog = db.catalog();

  assert!(matches!(
    validation_error(catalog.save_album(Album::new("Too Old", 999))),
    ValidationError::YearOutOfRange { field: "year_of_release", value: 999, .. }
  ));
  assert!(catalog.save_album(Album::new("Oldest", 1000)).is_ok());
  assert!(catalog.save_album(Album::new("This Year", 2024)).is_ok());
  assert!(matches!(
    validation_error(catalog.save_album(Album::new("Next Year", 2025))),
    ValidationError::YearOutOfRange { value: 2025, max: 2024, .. }
  ));

  let later = db.catalog_at(FixedClock::at_year(2025).unwrap());
  assert!(later.save_album(Album::new("Next Year", 2025)).is_ok());
}

#[test]
fn author_years_are_bounded_too() {
  let db = TestDb::new();
  let catalog = db.catalog();

  let mut author = Author::new("Time Traveller");
  author.last_appearance = Some(2030);

  assert_eq!(validation_error(catalog.save_author(author)).field(), "last_appearance");
}

#[test]
fn price_must_stay_below_five() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Prices", 2001)).unwrap();

  let mut song = song_in(&album, "Five", 100);
  song.price = "5.00".parse::<Price>().unwrap();
  assert!(matches!(validation_error(catalog.save_song(song, None)), ValidationError::PriceTooHigh { .. }));

  for (i, price) in ["0.00", "2.50", "4.99"].iter().enumerate() {
    let mut song = song_in(&album, &format!("Cheap {i}"), 100);
    song.price = price.parse().unwrap();
    let saved = catalog.save_song(song, None).unwrap();
    assert_eq!(catalog.get_song(saved.id).unwrap().unwrap().price.to_string(), *price);
  }
}

#[test]
fn invalid_musician_never_reaches_the_database() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let author = catalog.save_author(Author::new("Owner")).unwrap();

  let musician = Musician::new("Nobody", "ESP", Instrument::Voice, author.id);
  let id = musician.id;

  assert!(matches!(
    validation_error(catalog.save_musician(musician)),
    ValidationError::InvalidNationality { .. }
  ));
  assert!(catalog.repository().find_musician(id).unwrap().is_none());
}

// -------- uniqueness --------

#[test]
fn duplicate_song_tuple_is_rejected() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Twins", 1999)).unwrap();
  let author = catalog.save_author(Author::new("Twin Author")).unwrap();

  let mut first = song_in(&album, "Same", 180);
  first.author_id = Some(author.id);
  catalog.save_song(first, None).unwrap();

  let mut second = song_in(&album, "Same", 180);
  second.author_id = Some(author.id);
  let err = catalog.save_song(second, None).unwrap_err();
  assert!(matches!(err, CoreError::Repository(RepoError::Duplicate(_))), "{err:?}");

  let mut longer = song_in(&album, "Same", 181);
  longer.author_id = Some(author.id);
  assert!(catalog.save_song(longer, None).is_ok());
  assert_eq!(catalog.list_songs().unwrap().len(), 2);
}

#[test]
fn songs_without_author_do_not_collide() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Anonymous", 1999)).unwrap();

  catalog.save_song(song_in(&album, "Untitled", 60), None).unwrap();
  catalog.save_song(song_in(&album, "Untitled", 60), None).unwrap();

  assert_eq!(catalog.list_songs().unwrap().len(), 2);
}

#[test]
fn durations_keep_microsecond_precision() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Close Takes", 2003)).unwrap();
  let author = catalog.save_author(Author::new("Precise")).unwrap();

  let mut saved = Vec::new();
  for micros in [1_000_100, 1_000_200] {
    let mut song = Song::new("take.mp3", "Take", Duration::from_micros(micros));
    song.album_id = Some(album.id);
    song.author_id = Some(author.id);
    saved.push((catalog.save_song(song, None).unwrap().id, micros));
  }

  for (id, micros) in saved {
    let song = catalog.get_song(id).unwrap().unwrap();
    assert_eq!(song.duration, Duration::from_micros(micros));
  }
}

#[test]
fn one_profile_per_user() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let user = catalog.save_user(User::new("melomano")).unwrap();

  catalog.save_profile(Profile::new(user.id, Style::Indie)).unwrap();
  let err = catalog.save_profile(Profile::new(user.id, Style::Pop)).unwrap_err();

  assert!(matches!(err, CoreError::Repository(RepoError::Duplicate(_))));
  assert_eq!(catalog.get_profile_for(user.id).unwrap().unwrap().preferred_style, Style::Indie);
}

// -------- delete policies --------

#[test]
fn deleting_author_nulls_song_author() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Orphans", 1990)).unwrap();
  let author = catalog.save_author(Author::new("Gone")).unwrap();

  let mut song = song_in(&album, "Left Behind", 200);
  song.author_id = Some(author.id);
  let song = catalog.save_song(song, None).unwrap();

  catalog.delete_author(author.id).unwrap();

  let stored = catalog.get_song(song.id).unwrap().expect("song must survive its author");
  assert_eq!(stored.author_id, None);
}

#[test]
fn deleting_album_deletes_its_songs() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let doomed = catalog.save_album(Album::new("Doomed", 1980)).unwrap();
  let kept = catalog.save_album(Album::new("Kept", 1981)).unwrap();

  let a = catalog.save_song(song_in(&doomed, "A", 100), None).unwrap();
  let b = catalog.save_song(song_in(&doomed, "B", 100), None).unwrap();
  let c = catalog.save_song(song_in(&kept, "C", 100), None).unwrap();

  catalog.delete_album(doomed.id).unwrap();

  assert!(catalog.get_song(a.id).unwrap().is_none());
  assert!(catalog.get_song(b.id).unwrap().is_none());
  assert!(catalog.get_song(c.id).unwrap().is_some());
}

#[test]
fn deleting_song_clears_profile_preference() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Favourites", 2005)).unwrap();
  let song = catalog.save_song(song_in(&album, "Favourite", 240), None).unwrap();
  let user = catalog.save_user(User::new("fan")).unwrap();

  let mut profile = Profile::new(user.id, Style::Rock);
  profile.preferred_song_id = Some(song.id);
  catalog.save_profile(profile).unwrap();

  catalog.delete_song(song.id).unwrap();

  let profile = catalog.get_profile_for(user.id).unwrap().unwrap();
  assert_eq!(profile.preferred_song_id, None);
}

#[test]
fn deleting_user_clears_song_stamps_and_removes_profile() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Audit", 2010)).unwrap();
  let user = catalog.save_user(User::new("editor")).unwrap();
  catalog.save_profile(Profile::new(user.id, Style::Classic)).unwrap();

  let song = catalog.save_song(song_in(&album, "Edited", 120), Some(user.id)).unwrap();
  assert_eq!(song.created_by, Some(user.id));
  assert_eq!(song.last_modified_by, Some(user.id));

  catalog.delete_user(user.id).unwrap();

  let song = catalog.get_song(song.id).unwrap().unwrap();
  assert_eq!(song.created_by, None);
  assert_eq!(song.last_modified_by, None);
  assert!(catalog.get_profile_for(user.id).unwrap().is_none());
}

#[test]
fn deleting_author_cascades_to_owned_musicians_and_links() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let owner = catalog.save_author(Author::new("Owner")).unwrap();
  let other = catalog.save_author(Author::new("Other")).unwrap();

  let owned = catalog.save_musician(Musician::new("Owned", "ES", Instrument::Bass, owner.id)).unwrap();
  let free = catalog.save_musician(Musician::new("Free", "FR", Instrument::Harp, other.id)).unwrap();
  catalog.add_author_musicians(owner.id, &[owned.id, free.id]).unwrap();
  catalog.add_author_musicians(other.id, &[owned.id]).unwrap();

  catalog.delete_author(owner.id).unwrap();

  assert!(catalog.get_musician(owned.id).unwrap().is_none());
  assert!(catalog.get_musician(free.id).unwrap().is_some());
  assert!(catalog.author_musicians(owner.id).unwrap().is_empty());
  assert!(catalog.author_musicians(other.id).unwrap().is_empty());
}

#[test]
fn deleting_musician_only_removes_links() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let author = catalog.save_author(Author::new("Band")).unwrap();
  let musician = catalog.save_musician(Musician::new("Sideman", "DE", Instrument::Saxophone, author.id)).unwrap();
  catalog.add_author_musicians(author.id, &[musician.id]).unwrap();

  catalog.delete_musician(musician.id).unwrap();

  assert!(catalog.get_author(author.id).unwrap().is_some());
  assert!(catalog.author_musicians(author.id).unwrap().is_empty());
}

#[test]
fn deleting_missing_rows_reports_not_found() {
  let db = TestDb::new();
  let catalog = db.catalog();

  assert!(matches!(catalog.delete_album(AlbumId::new()), Err(CoreError::NotFound)));
  assert!(matches!(catalog.delete_author(AuthorId::new()), Err(CoreError::NotFound)));
}

// -------- many-to-many --------

#[test]
fn song_authors_read_back_as_the_added_set() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Collabs", 2015)).unwrap();
  let a = catalog.save_author(Author::new("A")).unwrap();
  let b = catalog.save_author(Author::new("B")).unwrap();
  let c = catalog.save_author(Author::new("C")).unwrap();

  let one = catalog.save_song(song_in(&album, "One", 100), None).unwrap();
  let two = catalog.save_song(song_in(&album, "Two", 100), None).unwrap();

  catalog.add_song_authors(one.id, &[c.id, a.id, b.id]).unwrap();
  catalog.add_song_authors(two.id, &[b.id]).unwrap();
  catalog.add_song_authors(two.id, &[a.id, c.id, b.id]).unwrap();

  let mut expected = vec![a.id, b.id, c.id];
  expected.sort();
  assert_eq!(catalog.song_authors(one.id).unwrap(), expected);
  assert_eq!(catalog.song_authors(two.id).unwrap(), expected);
}

#[test]
fn song_author_links_keep_their_ids() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Linked", 2016)).unwrap();
  let a = catalog.save_author(Author::new("A")).unwrap();
  let b = catalog.save_author(Author::new("B")).unwrap();
  let song = catalog.save_song(song_in(&album, "Linked", 100), None).unwrap();

  catalog.add_song_authors(song.id, &[b.id, a.id]).unwrap();
  let first = catalog.song_author_links(song.id).unwrap();

  let mut authors: Vec<AuthorId> = first.iter().map(|l| l.author_id).collect();
  authors.sort();
  assert_eq!(authors, catalog.song_authors(song.id).unwrap());
  assert!(first.iter().all(|l| l.song_id == song.id));
  assert_ne!(first[0].id, first[1].id);

  // Volver a enlazar el par no toca la fila guardada.
  catalog.add_author_songs(a.id, &[song.id]).unwrap();
  assert_eq!(catalog.song_author_links(song.id).unwrap(), first);
}

#[test]
fn author_songs_is_the_reverse_side() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Reverse", 2015)).unwrap();
  let author = catalog.save_author(Author::new("Prolific")).unwrap();
  let x = catalog.save_song(song_in(&album, "X", 100), None).unwrap();
  let y = catalog.save_song(song_in(&album, "Y", 100), None).unwrap();

  catalog.add_author_songs(author.id, &[y.id, x.id, y.id]).unwrap();

  let mut expected = vec![x.id, y.id];
  expected.sort();
  assert_eq!(catalog.author_songs(author.id).unwrap(), expected);
  assert_eq!(catalog.song_authors(x.id).unwrap(), vec![author.id]);
}

#[test]
fn song_author_and_song_authors_are_independent() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Split", 2000)).unwrap();
  let main = catalog.save_author(Author::new("Main")).unwrap();
  let guest = catalog.save_author(Author::new("Guest")).unwrap();

  let mut song = song_in(&album, "Duet", 100);
  song.author_id = Some(main.id);
  let song = catalog.save_song(song, None).unwrap();
  catalog.add_song_authors(song.id, &[guest.id]).unwrap();

  assert_eq!(catalog.get_song(song.id).unwrap().unwrap().author_id, Some(main.id));
  assert_eq!(catalog.song_authors(song.id).unwrap(), vec![guest.id]);
}

#[test]
fn bulk_add_with_unknown_id_writes_nothing() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let album = catalog.save_album(Album::new("Atomic", 2012)).unwrap();
  let known = catalog.save_author(Author::new("Known")).unwrap();
  let song = catalog.save_song(song_in(&album, "Atomic", 100), None).unwrap();

  let err = catalog.add_song_authors(song.id, &[known.id, AuthorId::new()]).unwrap_err();

  assert!(matches!(err, CoreError::Repository(RepoError::Constraint(_))), "{err:?}");
  assert!(catalog.song_authors(song.id).unwrap().is_empty());
}

#[test]
fn musicians_for_author_projects_name_and_instrument() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let owner = catalog.save_author(Author::new("Label")).unwrap();
  let author = catalog.save_author(Author::new("Band")).unwrap();

  let zoe = catalog.save_musician(Musician::new("Zoe", "GB", Instrument::Violin, owner.id)).unwrap();
  let ana = catalog.save_musician(Musician::new("Ana", "ES", Instrument::ElectricGuitar, owner.id)).unwrap();
  catalog.save_musician(Musician::new("Unlinked", "PT", Instrument::Flute, owner.id)).unwrap();

  catalog.add_author_musicians(author.id, &[zoe.id, ana.id]).unwrap();

  let summaries: Vec<(String, Instrument)> = catalog
    .musicians_for_author(author.id)
    .unwrap()
    .into_iter()
    .map(|m| (m.name, m.instrument))
    .collect();

  assert_eq!(
    summaries,
    vec![("Ana".to_string(), Instrument::ElectricGuitar), ("Zoe".to_string(), Instrument::Violin)]
  );
}

#[test]
fn author_musician_link_keeps_its_period() {
  let db = TestDb::new();
  let catalog = db.catalog();
  let author = catalog.save_author(Author::new("Quartet")).unwrap();
  let musician = catalog.save_musician(Musician::new("Cellist", "AT", Instrument::Violin, author.id)).unwrap();

  let mut link = RelationshipAuthorMusician::new(author.id, musician.id);
  link.start = Some(1995);
  link.end = Some(2003);
  catalog.link_author_musician(link).unwrap();

  let mut relink = RelationshipAuthorMusician::new(author.id, musician.id);
  relink.start = Some(1995);
  relink.end = Some(2008);
  catalog.link_author_musician(relink).unwrap();

  let links = catalog.repository().author_musician_links(author.id).unwrap();
  assert_eq!(links.len(), 1);
  assert_eq!((links[0].start, links[0].end), (Some(1995), Some(2008)));

  let mut bad = RelationshipAuthorMusician::new(author.id, musician.id);
  bad.start = Some(900);
  assert!(matches!(
    validation_error(catalog.link_author_musician(bad)),
    ValidationError::YearOutOfRange { field: "start", .. }
  ));
}

// -------- timestamps --------

#[test]
fn created_is_kept_and_last_modified_moves() {
  let db = TestDb::new();
  let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
  let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap();

  let first = db.catalog_at(FixedClock::new(t0));
  let album = first.save_album(Album::new("Timeline", 2024)).unwrap();
  let song = first.save_song(song_in(&album, "Draft", 100), None).unwrap();
  assert_eq!(song.created, Some(t0));
  assert_eq!(song.last_modified, Some(t0));

  let second = db.catalog_at(FixedClock::new(t1));
  let mut edit = second.get_song(song.id).unwrap().unwrap();
  edit.title = "Final".into();
  edit.created = None;
  second.save_song(edit, None).unwrap();

  let stored = second.get_song(song.id).unwrap().unwrap();
  assert_eq!(stored.title, "Final");
  assert_eq!(stored.created, Some(t0));
  assert_eq!(stored.last_modified, Some(t1));
}

#[test]
fn repository_fills_missing_created_on_first_insert() {
  let db = TestDb::new();
  let repo = SqliteCatalogRepository::new(db.path.to_str().unwrap()).unwrap();
  let clock = FixedClock::at_year(2024).unwrap();

  let album = discoteca_core::validate(Album::new("Raw", 2001), &clock).unwrap();
  repo.save_album(&album).unwrap();

  let song = discoteca_core::validate(song_in(&album, "Raw", 10), &clock).unwrap();
  repo.save_song(&song).unwrap();

  let stored = repo.find_song(song.id).unwrap().unwrap();
  assert!(stored.created.is_some());
  assert!(stored.last_modified.is_some());
}

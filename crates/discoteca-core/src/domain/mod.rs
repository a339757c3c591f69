pub mod album;
pub mod author;
pub mod ids;
pub mod instrument;
pub mod musician;
pub mod price;
pub mod profile;
pub mod relationship;
pub mod song;
pub mod style;
pub mod user;

pub use album::Album;
pub use author::Author;
pub use ids::{AlbumId, AuthorId, AuthorMusicianId, AuthorSongId, MusicianId, ProfileId, SongId, UserId};
pub use instrument::Instrument;
pub use musician::{Musician, MusicianSummary};
pub use price::Price;
pub use profile::Profile;
pub use relationship::{RelationshipAuthorMusician, RelationshipAuthorSong};
pub use song::Song;
pub use style::Style;
pub use user::User;

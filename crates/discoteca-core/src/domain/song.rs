use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{AlbumId, AuthorId, SongId, UserId};
use crate::domain::price::Price;
use crate::domain::style::Style;

/// Directorio (relativo al almacenamiento de medios) donde viven los audios.
pub const AUDIO_UPLOAD_DIR: &str = "audio";

/// La Canción (Song): una pista del catálogo con su audio y sus datos de venta.
///
/// La tupla `(title, author_id, album_id, duration)` es única en todo el
/// catálogo. `created` y `last_modified` los rellena el servicio al guardar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador único de la canción dentro del sistema.
  pub id: SongId,
  /// Referencia al archivo de audio, relativa al almacenamiento (`audio/...`).
  pub audio: String,
  /// El título de la canción.
  pub title: String,
  /// Autor directo. Se pone a `None` si el autor se borra.
  pub author_id: Option<AuthorId>,
  /// Álbum. Si el álbum se borra, la canción también.
  pub album_id: Option<AlbumId>,
  pub duration: Duration,
  pub style: Option<Style>,
  /// Número de reproducciones (no negativo).
  pub playbacks: Option<u32>,
  /// Precio en euros; debe ser estrictamente menor que 5.
  pub price: Price,
  /// Oferta del día.
  pub deal_of_the_day: bool,
  pub created: Option<DateTime<Utc>>,
  pub created_by: Option<UserId>,
  pub last_modified: Option<DateTime<Utc>>,
  pub last_modified_by: Option<UserId>,
}

impl Song {
  /// Crea una canción con los valores por defecto: precio 0.00, sin oferta,
  /// sin autor ni álbum.
  pub fn new(audio_file: &str, title: impl Into<String>, duration: Duration) -> Self {
    Self {
      id: SongId::new(),
      audio: audio_path(audio_file),
      title: title.into(),
      author_id: None,
      album_id: None,
      duration,
      style: None,
      playbacks: None,
      price: Price::ZERO,
      deal_of_the_day: false,
      created: None,
      created_by: None,
      last_modified: None,
      last_modified_by: None,
    }
  }
}

/// Prefija `file_name` con [`AUDIO_UPLOAD_DIR`] salvo que ya lo esté.
pub fn audio_path(file_name: &str) -> String {
  let prefix = format!("{AUDIO_UPLOAD_DIR}/");
  if file_name.starts_with(&prefix) { file_name.to_string() } else { format!("{prefix}{file_name}") }
}

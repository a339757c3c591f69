use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ProfileId, SongId, UserId};
use crate::domain::style::Style;

/// Perfil de un usuario (uno a uno con la cuenta).
///
/// Si la cuenta se borra, el perfil también; si la canción preferida se
/// borra, `preferred_song_id` pasa a `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id: ProfileId,
  pub user_id: UserId,
  /// Inicio de la franja diaria (por defecto 09:00).
  pub daily_start_time: NaiveTime,
  /// Fin de la franja diaria (por defecto 14:00).
  pub daily_finish_time: NaiveTime,
  pub preferred_style: Style,
  pub preferred_song_id: Option<SongId>,
}

impl Profile {
  pub fn new(user_id: UserId, preferred_style: Style) -> Self {
    Self {
      id: ProfileId::new(),
      user_id,
      daily_start_time: default_start_time(),
      daily_finish_time: default_finish_time(),
      preferred_style,
      preferred_song_id: None,
    }
  }
}

pub fn default_start_time() -> NaiveTime {
  NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn default_finish_time() -> NaiveTime {
  NaiveTime::from_hms_opt(14, 0, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_window_is_nine_to_two() {
    let profile = Profile::new(UserId::new(), Style::Folk);

    assert_eq!(profile.daily_start_time.to_string(), "09:00:00");
    assert_eq!(profile.daily_finish_time.to_string(), "14:00:00");
    assert!(profile.preferred_song_id.is_none());
  }
}

//! Validación previa a cualquier escritura.
//!
//! Cada entidad implementa [`Validate`]. La única forma de obtener un
//! [`Validated<T>`] es pasar por [`validate`], y los métodos de escritura del
//! repositorio solo aceptan `&Validated<T>`: ninguna ruta de escritura puede
//! saltarse las reglas. Las reglas se comprueban en el orden de declaración
//! de los campos y se devuelve el primer fallo.

mod error;
pub mod rules;

use std::ops::Deref;

pub use error::ValidationError;
pub use rules::{MIN_YEAR, PRICE_CEILING_CENTS};

use crate::clock::Clock;
use crate::domain::{
  Album, Author, Musician, Profile, RelationshipAuthorMusician, RelationshipAuthorSong, Song, User,
};

pub trait Validate {
  fn validate(&self, clock: &dyn Clock) -> Result<(), ValidationError>;
}

/// Valor que ha superado [`Validate::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Deref for Validated<T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.0
  }
}

impl<T> AsRef<T> for Validated<T> {
  fn as_ref(&self) -> &T {
    &self.0
  }
}

/// Valida `value` con el reloj dado y lo envuelve en [`Validated`].
pub fn validate<T: Validate>(value: T, clock: &dyn Clock) -> Result<Validated<T>, ValidationError> {
  value.validate(clock)?;
  Ok(Validated(value))
}

impl Validate for User {
  fn validate(&self, _clock: &dyn Clock) -> Result<(), ValidationError> {
    rules::text("username", &self.username, 150)
  }
}

impl Validate for Author {
  fn validate(&self, clock: &dyn Clock) -> Result<(), ValidationError> {
    rules::text("name", &self.name, 255)?;

    if let Some(website) = &self.website {
      rules::max_len("website", website, 200)?;
      rules::url("website", website)?;
    }

    rules::optional_year("first_appearance", self.first_appearance, clock)?;
    rules::optional_year("last_appearance", self.last_appearance, clock)?;

    if let (Some(first), Some(last)) = (self.first_appearance, self.last_appearance) {
      if first > last {
        return Err(ValidationError::AppearanceOrder { first, last });
      }
    }

    Ok(())
  }
}

impl Validate for Musician {
  fn validate(&self, _clock: &dyn Clock) -> Result<(), ValidationError> {
    rules::text("name", &self.name, 150)?;
    rules::nationality(&self.nationality)
  }
}

impl Validate for Album {
  fn validate(&self, clock: &dyn Clock) -> Result<(), ValidationError> {
    rules::text("title", &self.title, 255)?;
    rules::year("year_of_release", self.year_of_release, clock)?;
    rules::optional_text("produced_by", self.produced_by.as_deref(), 255)
  }
}

impl Validate for Song {
  fn validate(&self, _clock: &dyn Clock) -> Result<(), ValidationError> {
    rules::text("audio", &self.audio, 100)?;
    rules::text("title", &self.title, 250)?;
    rules::duration("duration", self.duration)?;
    rules::price_below_five(self.price)
  }
}

impl Validate for Profile {
  /// Todos los campos del perfil quedan garantizados por sus tipos.
  fn validate(&self, _clock: &dyn Clock) -> Result<(), ValidationError> {
    Ok(())
  }
}

impl Validate for RelationshipAuthorMusician {
  fn validate(&self, clock: &dyn Clock) -> Result<(), ValidationError> {
    rules::optional_year("start", self.start, clock)?;
    rules::optional_year("end", self.end, clock)
  }
}

impl Validate for RelationshipAuthorSong {
  fn validate(&self, _clock: &dyn Clock) -> Result<(), ValidationError> {
    Ok(())
  }
}

use thiserror::Error;

use crate::ports::RepoError;
use crate::validation::ValidationError;

/// Error genérico del núcleo de Discoteca.
///
/// Las capas superiores (CLI, binarios de prueba, etc.) deberían mapear este
/// error a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("repository error: {0}")]
  Repository(#[from] RepoError),

  #[error("not found")]
  NotFound,
}

use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};

/// Cuenta de usuario mínima: lo justo para perfiles y autoría de cambios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: UserId,
  /// Nombre de usuario, único.
  pub username: String,
}

impl User {
  pub fn new(username: impl Into<String>) -> Self {
    Self { id: UserId::new(), username: username.into() }
  }
}

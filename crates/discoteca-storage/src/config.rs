use discoteca_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SECTION: &str = "storage";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
  pub db_path: PathBuf,
  /// `PRAGMA journal_mode` a aplicar en cada conexión (`None` = el de SQLite).
  #[serde(default)]
  pub journal_mode: Option<String>,
  /// Conexiones máximas del pool.
  #[serde(default = "default_pool_size")]
  pub pool_size: u32,
}

fn default_pool_size() -> u32 {
  4
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self::in_dir(&PATHS.data_dir)
  }
}

impl StorageConfig {
  /// Configuración por defecto con la base de datos dentro de `data_dir`.
  pub fn in_dir(data_dir: &std::path::Path) -> Self {
    StorageConfig {
      db_path: data_dir.join("discoteca.db"),
      journal_mode: Some("WAL".to_string()),
      pool_size: default_pool_size(),
    }
  }

  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&CONFIG_BACKEND)
  }

  /// Lee la sección `[storage]` y la vuelve a escribir completa, de modo
  /// que el archivo siempre muestra todas las claves.
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let defaults = Self::in_dir(&backend.paths().data_dir);
    let cfg = match backend.load_section_with_default::<Option<StorageConfig>>(SECTION)? {
      Some(cfg) => cfg,
      None => defaults,
    };
    cfg.save_to(backend)?;
    Ok(cfg)
  }

  /// Escribe la sección `[storage]` sin tocar el resto del archivo.
  pub fn save_to(&self, backend: &TomlConfigBackend) -> Result<(), ConfigError> {
    backend.save_section(SECTION, self)
  }

  pub fn database_url(&self) -> String {
    self.db_path.to_string_lossy().into_owned()
  }
}

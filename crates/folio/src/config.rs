//! Configuration file handling.
//!
//! Configuration lives in a single TOML file, by default under the platform
//! configuration directory:
//!
//! ```toml
//! library_path = "/home/me/.local/share/folio/library"
//!
//! [extraction]
//! sections = 10
//! title_max_len = 50
//!
//! [reader]
//! preview_len = 50
//! learn_knowledge = true
//! ```
//!
//! Every key is optional; anything missing falls back to its default, and a missing
//! file is the same as an empty one.

use super::*;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
  /// Directory the library stores books in
  pub library_path: PathBuf,
  /// Chapter detection settings
  pub extraction:   ExtractionConfig,
  /// Reader presentation settings
  pub reader:       ReaderConfig,
}

/// Settings for chapter detection during import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractionConfig {
  /// Roughly how many `Section N` chapters to create when none are detected
  pub sections:      usize,
  /// Lines at least this long are never taken as a chapter title
  pub title_max_len: usize,
}

/// Settings for presenting pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReaderConfig {
  /// Characters of page text shown in page lists
  pub preview_len:     usize,
  /// Whether reading a page records the characters, places and events it mentions
  pub learn_knowledge: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      library_path: crate::library::Library::default_path(),
      extraction:   ExtractionConfig::default(),
      reader:       ReaderConfig::default(),
    }
  }
}

impl Default for ExtractionConfig {
  fn default() -> Self { Self { sections: 10, title_max_len: 50 } }
}

impl Default for ReaderConfig {
  fn default() -> Self { Self { preview_len: 50, learn_knowledge: true } }
}

impl Config {
  /// Returns the default path of the configuration file.
  ///
  /// - On Unix: `~/.config/folio/config.toml`
  /// - On macOS: `~/Library/Application Support/folio/config.toml`
  /// - On Windows: `%APPDATA%\folio\config.toml`
  /// - Fallback: `./folio/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("folio").join("config.toml")
  }

  /// Loads the configuration at `path`, or the defaults if there is no file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file exists but cannot be read, is not valid TOML or names
  /// an empty library path.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!("No configuration at {}, using defaults", path.display());
      return Ok(Self::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    if config.library_path.as_os_str().is_empty() {
      return Err(FolioError::Config(format!("{} sets an empty library_path", path.display())));
    }
    trace!("Loaded configuration from {}: {config:?}", path.display());
    Ok(config)
  }

  /// Writes the configuration to `path`, creating parent directories.
  ///
  /// # Errors
  ///
  /// Returns an error if the file or its directories cannot be written.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    info!("Saved configuration to {}", path.display());
    Ok(())
  }

  /// Sets the library directory.
  pub fn with_library_path(mut self, library_path: &Path) -> Self {
    self.library_path = library_path.to_path_buf();
    self
  }

  /// Sets the number of fallback sections created when no chapters are detected.
  pub fn with_sections(mut self, sections: usize) -> Self {
    self.extraction.sections = sections;
    self
  }
}

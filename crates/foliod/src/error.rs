//! Error types for the folio CLI.

use thiserror::Error;

use super::*;

/// Error type alias used for the [`foliod`](crate) binary.
pub type Result<T> = core::result::Result<T, FoliodError>;

/// Errors that can occur while running a CLI command.
#[derive(Error, Debug)]
pub enum FoliodError {
  /// An error from the [`folio`] library.
  #[error(transparent)]
  Folio(#[from] FolioError),

  /// File system errors outside the library, such as reading branch content.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The user prompt failed, usually because there is no terminal.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// An import pattern is not a valid glob.
  #[error(transparent)]
  Pattern(#[from] glob::PatternError),

  /// A path matched by an import pattern could not be read.
  #[error(transparent)]
  Glob(#[from] glob::GlobError),

  /// A 1-based page number was zero.
  #[error("Page numbers start at 1, got {0}")]
  InvalidPageNumber(usize),
}

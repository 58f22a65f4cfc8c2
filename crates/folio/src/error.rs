//! Error types for the folio library.
//!
//! This module provides a single error type covering every failure mode of the crate:
//! - Lookups of chapters, branches or books that do not exist
//! - Page addresses outside the content they point into
//! - Malformed branches rejected before they reach a book
//! - Import of unsupported or unreadable files
//! - Library and configuration storage
//!
//! # Examples
//!
//! ```
//! use folio::{error::FolioError, prelude::*};
//!
//! let book = Book::new("Short", "Anon", BookFormat::Txt, vec![PageContent::text("only page")]);
//! match BranchResolver::new(&book, None).content_at(3) {
//!   Err(FolioError::OutOfRange { index, len }) => assert_eq!((index, len), (3, 1)),
//!   other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`folio`](crate) crate.
pub type Result<T> = core::result::Result<T, FolioError>;

/// Errors that can occur when working with the folio library.
#[derive(Error, Debug)]
pub enum FolioError {
  /// A chapter, branch or book referenced by the caller is not present.
  ///
  /// For chapters this is a caller bug: the chapter passed to a page-range query
  /// must be a member of the book it is asked about. The string names what was
  /// looked up.
  #[error("Not found: {0}")]
  NotFound(String),

  /// A page address resolved outside the content it points into.
  ///
  /// Raised for main-timeline indices outside `[0, len)` and for branch-local
  /// indices past the end of a branch's content. `len` is the length of whichever
  /// sequence was addressed.
  #[error("Page index {index} is out of range for {len} pages")]
  OutOfRange {
    /// The offending index, main-timeline or branch-local
    index: usize,
    /// Length of the addressed page sequence
    len:   usize,
  },

  /// A branch failed validation when added to a book.
  ///
  /// This occurs when:
  /// - The branch has no pages
  /// - The branch point or reconnect point lies outside the book
  /// - Another branch with the same id exists
  #[error("Invalid branch: {0}")]
  InvalidBranch(String),

  /// Tried to change the pages of a book that is not editable in place, such as a PDF.
  #[error("\"{0}\" cannot be edited")]
  NotEditable(String),

  /// The file format cannot be imported.
  #[error("Unsupported file format: {0}")]
  UnsupportedFormat(String),

  /// Tried to add a book whose id is already taken in the library.
  ///
  /// The string carries the title of the conflicting book.
  #[error("Tried to add a book titled \"{0}\" that was already in the library.")]
  DuplicateBook(String),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// A stored book could not be serialized or deserialized.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The configuration file is not valid TOML for [`Config`](crate::config::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be written as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// PDF parsing errors from the lopdf library.
  ///
  /// Common causes are malformed or encrypted documents and missing objects.
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// Configuration is inconsistent, such as an empty library path.
  #[error("{0}")]
  Config(String),
}

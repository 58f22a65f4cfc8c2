//! Books, chapters and branching storylines for readers and novel planners.
//!
//! `folio` is a library for reading and planning long-form text, providing:
//!
//! - Import of plain text, HTML and PDF documents into [`Book`](book::Book)s
//! - Chapter detection over imported pages
//! - Chapter and page-range lookups over a book's main timeline
//! - Alternate story branches spliced into the page-index space
//! - A reading session that drives page navigation
//! - A local on-disk library of books
//! - Characters, places and events gathered from the pages being read
//!
//! # Getting Started
//!
//! ```no_run
//! use folio::{config::Config, import, library::Library, prelude::*, session::ReadingSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load(Config::default_path())?;
//!   let library = Library::open(&config.library_path).await?;
//!
//!   // Import a book and store it
//!   let book = import::import_file("pride-and-prejudice.txt", &config.extraction).await?;
//!   library.add(&book).await?;
//!
//!   // Page through it
//!   let mut session = ReadingSession::new(&book);
//!   session.next();
//!   println!("{}", session.content()?.display());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`book`]: Core book, chapter, branch and page types
//! - [`pagination`]: Chapter and page-range queries over the main timeline
//! - [`branch`]: Page addressing while a story branch is active
//! - [`session`]: Reading session state and navigation
//! - [`extraction`]: Chapter detection for imported content
//! - [`import`]: File import for supported formats
//! - [`knowledge`]: Characters, settings, events and relationships found in page text
//! - [`library`]: Book storage on disk
//! - [`config`]: Configuration file handling
//! - [`format`]: Text, HTML and title formatting helpers
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod book;
pub mod branch;
pub mod config;
pub mod error;
pub mod extraction;
pub mod format;
pub mod import;
pub mod knowledge;
pub mod library;
pub mod pagination;
pub mod session;

use crate::{book::*, config::*, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use folio::prelude::*;
///
/// fn first_page(book: &Book) -> Result<String, FolioError> {
///   let resolver = BranchResolver::new(book, None);
///   Ok(resolver.content_at(0)?.display().to_string())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    book::{Book, BookFormat, Branch, Chapter, PageContent},
    branch::BranchResolver,
    error::FolioError,
    pagination::{ChapterPosition, PageIndices, PaginationIndex},
  };
}

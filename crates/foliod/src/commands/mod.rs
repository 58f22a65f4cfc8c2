//! Subcommands of the folio CLI.

use super::*;

pub mod branch;
pub mod chapters;
pub mod edit;
pub mod import;
pub mod init;
pub mod knowledge;
pub mod list;
pub mod read;
pub mod remove;

pub use branch::{branch, BranchArgs};
pub use chapters::chapters;
pub use edit::{edit, EditArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitOptions};
pub use knowledge::knowledge;
pub use list::list;
pub use read::{read, ReadArgs};
pub use remove::remove;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration file and create the library
  Init(InitOptions),

  /// Import files into the library
  Import(ImportArgs),

  /// List the books in the library
  List,

  /// Show the chapters and branches of a book
  Chapters {
    /// Book id or title
    book: String,
  },

  /// Print a page of a book
  Read(ReadArgs),

  /// Plan an alternate story branch for a book
  Branch(BranchArgs),

  /// Show the characters, places, events and relationships found while reading
  Knowledge {
    /// Book id or title
    book: String,
  },

  /// Replace the text of one page of a book
  Edit(EditArgs),

  /// Remove a book from the library after confirmation
  Remove {
    /// Book id or title
    book: String,
  },
}

/// Loads the configuration at `config_path` and opens the library it points at.
pub async fn open_library(config_path: &Path) -> Result<(Config, Library)> {
  trace!("Using configuration at {}", config_path.display());
  let config = Config::load(config_path)?;
  let library = Library::open(&config.library_path).await?;
  debug!("Using library at {}", library.path().display());
  Ok((config, library))
}

/// Converts a 1-based page number from the command line into a page index.
pub fn page_index(page_number: usize) -> Result<usize> {
  page_number.checked_sub(1).ok_or(FoliodError::InvalidPageNumber(page_number))
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use tempfile::tempdir;

  use super::*;

  /// Answers every question the same way and records what it was told.
  struct Scripted {
    /// Answer to every confirmation
    answer:  bool,
    /// One line per reply, in order
    replies: RefCell<Vec<String>>,
  }

  impl Scripted {
    fn answering(answer: bool) -> Self { Self { answer, replies: RefCell::new(Vec::new()) } }

    fn last_reply(&self) -> String { self.replies.borrow().last().cloned().unwrap_or_default() }
  }

  impl UserInteraction for Scripted {
    fn confirm(&self, _message: &str) -> Result<bool> { Ok(self.answer) }

    fn prompt(&self, _message: &str) -> Result<String> { Ok(String::new()) }

    fn reply(&self, content: ResponseContent) -> Result<()> {
      let line = match content {
        ResponseContent::Book(book) => format!("book {}", book.id),
        ResponseContent::Books(books) => format!("{} books", books.len()),
        ResponseContent::Chapters { book, .. } => format!("chapters of {}", book.id),
        ResponseContent::Knowledge(book) => format!("{} characters", book.characters.len()),
        ResponseContent::Page(session) => format!("page {}", session.position()),
        ResponseContent::Success(message) => format!("success: {message}"),
        ResponseContent::Error(error) => format!("error: {error}"),
        ResponseContent::Info(message) => format!("info: {message}"),
      };
      self.replies.borrow_mut().push(line);
      Ok(())
    }
  }

  #[test]
  fn test_page_index() {
    assert_eq!(page_index(1).unwrap(), 0);
    assert_eq!(page_index(12).unwrap(), 11);
    assert!(matches!(page_index(0), Err(FoliodError::InvalidPageNumber(0))));
  }

  #[tokio::test]
  async fn test_declined_default_path_writes_nothing() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let interaction = Scripted::answering(false);

    init(&interaction, &config_path, InitOptions { library_path: None }).await.unwrap();
    assert!(interaction.last_reply().contains("--library-path"));
    assert!(!config_path.exists());
  }

  #[tokio::test]
  async fn test_remove_follows_the_answer() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let no = Scripted::answering(false);
    let options = InitOptions { library_path: Some(dir.path().join("library")) };
    init(&no, &config_path, options).await.unwrap();

    let novel = dir.path().join("Stormy Night.txt");
    std::fs::write(&novel, "CHAPTER ONE\nIt was a dark and stormy night.\n\nthe rain fell\n")
      .unwrap();
    let patterns = vec![novel.to_string_lossy().into_owned()];
    let added = import(&no, &config_path, ImportArgs { patterns }).await.unwrap();
    assert_eq!(added.len(), 1);

    remove(&no, &config_path, "stormy-night").await.unwrap();
    assert_eq!(no.last_reply(), "info: Kept the book");
    list(&no, &config_path).await.unwrap();
    assert_eq!(no.last_reply(), "1 books");

    let yes = Scripted::answering(true);
    remove(&yes, &config_path, "stormy-night").await.unwrap();
    assert_eq!(yes.last_reply(), "success: Removed Stormy Night");
    list(&yes, &config_path).await.unwrap();
    assert_eq!(yes.last_reply(), "0 books");
  }
}

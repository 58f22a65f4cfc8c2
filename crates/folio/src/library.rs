//! Book storage on disk.
//!
//! A [`Library`] is a directory holding one pretty-printed JSON file per book, named
//! after the book id. Book ids are slugs (see [`format::format_title`]), so lookups
//! accept either the id or the title of a book.
//!
//! Files that cannot be read or do not parse as books are skipped by [`Library::list`]
//! with a warning.

use super::*;

/// Extension of stored book files.
const BOOK_EXTENSION: &str = "json";

/// A directory of stored books.
#[derive(Debug, Clone)]
pub struct Library {
  /// Directory the books are stored in
  path: PathBuf,
}

impl Library {
  /// Opens the library at `path`, creating the directory if needed.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// # use folio::library::Library;
  /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
  /// // Open in a specific location
  /// let library = Library::open("books").await?;
  ///
  /// // Or use the default location
  /// let library = Library::open(Library::default_path()).await?;
  /// # Ok(())
  /// # }
  /// ```
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&path).await?;
    debug!("Opened library at {}", path.display());
    Ok(Self { path })
  }

  /// Returns the default library directory.
  ///
  /// - On Unix: `~/.local/share/folio/library`
  /// - On macOS: `~/Library/Application Support/folio/library`
  /// - On Windows: `%APPDATA%\folio\library`
  /// - Fallback: `./folio/library`
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("folio").join("library")
  }

  /// Directory the books are stored in.
  pub fn path(&self) -> &Path { &self.path }

  /// Stores a new book.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::DuplicateBook`] if a book with the same id is already stored.
  pub async fn add(&self, book: &Book) -> Result<()> {
    if tokio::fs::try_exists(self.book_path(&book.id)).await? {
      return Err(FolioError::DuplicateBook(book.title.clone()));
    }
    self.save(book).await?;
    info!("Added {} to the library", book.title);
    Ok(())
  }

  /// Stores `book`, replacing any stored book with the same id.
  pub async fn save(&self, book: &Book) -> Result<()> {
    let path = self.book_path(&book.id);
    tokio::fs::write(&path, serde_json::to_string_pretty(book)?).await?;
    debug!("Saved {} to {}", book.id, path.display());
    Ok(())
  }

  /// Loads the book with the given id or title.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] if no such book is stored.
  pub async fn get(&self, id: &str) -> Result<Book> {
    let path = self.book_path(id);
    let content = match tokio::fs::read_to_string(&path).await {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound =>
        return Err(FolioError::NotFound(format!("book {id}"))),
      Err(e) => return Err(e.into()),
    };
    trace!("Read {}", path.display());
    Ok(serde_json::from_str(&content)?)
  }

  /// All stored books, sorted by title.
  pub async fn list(&self) -> Result<Vec<Book>> {
    let mut books = Vec::new();
    let mut entries = tokio::fs::read_dir(&self.path).await?;
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if path.extension().and_then(|e| e.to_str()) != Some(BOOK_EXTENSION) {
        continue;
      }
      let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
          warn!("Skipping unreadable {}: {e}", path.display());
          continue;
        },
      };
      match serde_json::from_str::<Book>(&content) {
        Ok(book) => books.push(book),
        Err(e) => warn!("Skipping {}: {e}", path.display()),
      }
    }
    books.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(books)
  }

  /// Deletes the book with the given id or title, returning it.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] if no such book is stored.
  pub async fn remove(&self, id: &str) -> Result<Book> {
    let book = self.get(id).await?;
    tokio::fs::remove_file(self.book_path(&book.id)).await?;
    info!("Removed {} from the library", book.title);
    Ok(book)
  }

  /// File a book id or title is stored under.
  fn book_path(&self, id: &str) -> PathBuf {
    self.path.join(format!("{}.{BOOK_EXTENSION}", format::format_title(id, None)))
  }
}

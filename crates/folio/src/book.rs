//! Core book types: pages, chapters and story branches.
//!
//! A [`Book`] is a flat, ordered sequence of [`PageContent`]; the position of a page in
//! that sequence is its canonical address. On top of the pages sit:
//!
//! - [`Chapter`]s, each naming the first page it covers, sorted by that page
//! - [`Branch`]es, alternate continuations that diverge from the main timeline at a
//!   branch point and carry their own pages
//!
//! Chapters are computed once when a book is imported (see [`extraction`](crate::extraction))
//! and branches are added through [`Book::add_branch`], which enforces their invariants.
//! Everything that reads a book for navigation ([`pagination`](crate::pagination),
//! [`branch`](crate::branch), [`session`](crate::session)) only ever borrows it.
//!
//! # Examples
//!
//! ```
//! use folio::prelude::*;
//!
//! let pages = vec![PageContent::text("one"), PageContent::text("two"), PageContent::text("three")];
//! let mut book = Book::new("Three Pages", "Anon", BookFormat::Txt, pages);
//! book.add_branch(Branch::new("what-if", "What if", 1, vec![PageContent::text("two, again")]))?;
//! assert_eq!(book.page_count(), 3);
//! assert!(book.branch("what-if").is_some());
//! # Ok::<(), FolioError>(())
//! ```

use super::*;
use crate::knowledge::{Character, Event, Relationship, Setting};

/// File formats a book can originate from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
  /// Plain text, pages separated by blank lines
  Txt,
  /// HTML, pages split at headings
  Html,
  /// PDF, one page per PDF page
  Pdf,
  /// EPUB container
  Epub,
  /// Word document
  Docx,
  /// Rich text format
  Rtf,
}

impl BookFormat {
  /// Maps a file extension (without the dot, any case) to a format.
  pub fn from_extension(extension: &str) -> Option<Self> {
    match extension.to_ascii_lowercase().as_str() {
      "txt" | "text" => Some(Self::Txt),
      "html" | "htm" | "xhtml" => Some(Self::Html),
      "pdf" => Some(Self::Pdf),
      "epub" => Some(Self::Epub),
      "docx" => Some(Self::Docx),
      "rtf" => Some(Self::Rtf),
      _ => None,
    }
  }
}

impl Display for BookFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::Txt => "txt",
      Self::Html => "html",
      Self::Pdf => "pdf",
      Self::Epub => "epub",
      Self::Docx => "docx",
      Self::Rtf => "rtf",
    };
    write!(f, "{name}")
  }
}

impl FromStr for BookFormat {
  type Err = FolioError;

  fn from_str(s: &str) -> Result<Self> {
    Self::from_extension(s).ok_or_else(|| FolioError::UnsupportedFormat(s.to_string()))
  }
}

/// The content of a single page.
///
/// Pages always carry plain text. Imported pages usually carry an HTML rendering
/// as well, which takes precedence when the page is displayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageContent {
  /// Plain text of the page
  pub text: String,
  /// HTML rendering of the page, if any
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub html: Option<String>,
}

impl PageContent {
  /// Creates a plain-text page.
  pub fn text(text: impl Into<String>) -> Self { Self { text: text.into(), html: None } }

  /// Creates a page from plain text, deriving its HTML rendering.
  pub fn from_text(text: impl Into<String>) -> Self {
    let text = text.into();
    let html = format::text_to_html(&text);
    Self { text, html: Some(html) }
  }

  /// Creates a page from HTML, deriving its plain text.
  pub fn from_html(html: impl Into<String>) -> Self {
    let html = html.into();
    Self { text: format::strip_tags(&html), html: Some(html) }
  }

  /// Attaches an HTML rendering to the page.
  pub fn with_html(mut self, html: impl Into<String>) -> Self {
    self.html = Some(html.into());
    self
  }

  /// The field a presentation layer should render: HTML when present and
  /// non-empty, the plain text otherwise.
  pub fn display(&self) -> &str {
    match &self.html {
      Some(html) if !html.is_empty() => html,
      _ => &self.text,
    }
  }

  /// Whether the page has neither text nor HTML.
  pub fn is_empty(&self) -> bool {
    self.text.trim().is_empty() && self.html.as_deref().map_or(true, |h| h.trim().is_empty())
  }
}

/// A chapter: a titled entry point into the main timeline.
///
/// A chapter only stores its first page. The pages it covers run up to the page
/// before the next chapter's first page, see
/// [`PaginationIndex::page_range_of`](crate::pagination::PaginationIndex::page_range_of).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
  /// Identifier, unique within a book
  pub id:         String,
  /// Display title
  pub title:      String,
  /// First page belonging to this chapter
  pub page_index: usize,
}

impl Chapter {
  /// Creates a chapter starting at `page_index`.
  pub fn new(id: impl Into<String>, title: impl Into<String>, page_index: usize) -> Self {
    Self { id: id.into(), title: title.into(), page_index }
  }
}

/// An alternate storyline diverging from the main timeline.
///
/// While a branch is active, page `branch_point_page_index` and everything after it
/// is read from [`Branch::content`] instead of the book's own pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
  /// Identifier, unique within a book
  pub id:                      String,
  /// Display name
  pub name:                    String,
  /// What happens differently in this branch
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:             Option<String>,
  /// Main-timeline page where the branch diverges
  pub branch_point_page_index: usize,
  /// The branch's own pages, addressed relative to the branch point
  pub content:                 Vec<PageContent>,
  /// Main-timeline page where the branch rejoins the story, if it does
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reconnect_page_index:    Option<usize>,
}

impl Branch {
  /// Creates a branch diverging at `branch_point_page_index`.
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    branch_point_page_index: usize,
    content: Vec<PageContent>,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      description: None,
      branch_point_page_index,
      content,
      reconnect_page_index: None,
    }
  }

  /// Sets the branch description.
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Sets the main-timeline page the branch rejoins at.
  pub fn with_reconnect(mut self, reconnect_page_index: usize) -> Self {
    self.reconnect_page_index = Some(reconnect_page_index);
    self
  }

  /// Page index one past the last page reachable through this branch.
  pub fn end_page_index(&self) -> usize { self.branch_point_page_index + self.content.len() }
}

/// A book: its pages plus the chapters and branches laid over them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
  /// Identifier, derived from the title at creation
  pub id:            String,
  /// Title
  pub title:         String,
  /// Author
  pub author:        String,
  /// Format the book was imported from
  pub format:        BookFormat,
  /// When the book was created or imported
  pub added:         DateTime<Utc>,
  /// Whether page text may be edited in place
  #[serde(default)]
  pub is_editable:   bool,
  /// The main timeline, one entry per page
  pub pages:         Vec<PageContent>,
  /// Chapters, sorted by first page
  #[serde(default)]
  pub chapters:      Vec<Chapter>,
  /// Alternate storylines
  #[serde(default)]
  pub branches:      Vec<Branch>,
  /// Characters met while reading
  #[serde(default)]
  pub characters:    Vec<Character>,
  /// Events seen while reading
  #[serde(default)]
  pub events:        Vec<Event>,
  /// Places seen while reading
  #[serde(default)]
  pub settings:      Vec<Setting>,
  /// Relationships between characters
  #[serde(default)]
  pub relationships: Vec<Relationship>,
}

impl Book {
  /// Creates a book with no chapters or branches.
  ///
  /// A book always has at least one page: an empty `pages` becomes a single empty
  /// page. PDFs are the only format not editable in place.
  pub fn new(
    title: impl Into<String>,
    author: impl Into<String>,
    format: BookFormat,
    pages: Vec<PageContent>,
  ) -> Self {
    let title = title.into();
    let pages = if pages.is_empty() { vec![PageContent::default()] } else { pages };
    Self {
      id: format::format_title(&title, None),
      title,
      author: author.into(),
      format,
      added: Utc::now(),
      is_editable: format != BookFormat::Pdf,
      pages,
      chapters: Vec::new(),
      branches: Vec::new(),
      characters: Vec::new(),
      events: Vec::new(),
      settings: Vec::new(),
      relationships: Vec::new(),
    }
  }

  /// Replaces the book's chapters.
  pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Self {
    self.chapters = chapters;
    self
  }

  /// Number of pages on the main timeline.
  pub fn page_count(&self) -> usize { self.pages.len() }

  /// Looks up a chapter by id.
  pub fn chapter(&self, id: &str) -> Option<&Chapter> { self.chapters.iter().find(|c| c.id == id) }

  /// Looks up a branch by id.
  pub fn branch(&self, id: &str) -> Option<&Branch> { self.branches.iter().find(|b| b.id == id) }

  /// Adds a branch after checking it against this book.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::InvalidBranch`] if the branch has no pages, diverges or
  /// reconnects outside the main timeline, or reuses the id of an existing branch.
  pub fn add_branch(&mut self, branch: Branch) -> Result<()> {
    if branch.content.is_empty() {
      return Err(FolioError::InvalidBranch(format!("branch \"{}\" has no pages", branch.name)));
    }
    if branch.branch_point_page_index >= self.pages.len() {
      return Err(FolioError::InvalidBranch(format!(
        "branch point {} is past the last page of \"{}\" ({} pages)",
        branch.branch_point_page_index,
        self.title,
        self.pages.len()
      )));
    }
    if let Some(reconnect) = branch.reconnect_page_index {
      if reconnect >= self.pages.len() {
        return Err(FolioError::InvalidBranch(format!(
          "reconnect point {reconnect} is past the last page of \"{}\"",
          self.title
        )));
      }
    }
    if self.branch(&branch.id).is_some() {
      return Err(FolioError::InvalidBranch(format!("a branch with id {} already exists", branch.id)));
    }
    debug!(
      "Adding branch {} to {} at page {} with {} pages",
      branch.id,
      self.id,
      branch.branch_point_page_index,
      branch.content.len()
    );
    self.branches.push(branch);
    Ok(())
  }

  /// Replaces the content of one page without changing the page order or count.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotEditable`] for books that are not editable in place and
  /// [`FolioError::OutOfRange`] if `index` is not a page of this book.
  pub fn replace_page(&mut self, index: usize, content: PageContent) -> Result<()> {
    if !self.is_editable {
      return Err(FolioError::NotEditable(self.title.clone()));
    }
    let len = self.pages.len();
    let page = self.pages.get_mut(index).ok_or(FolioError::OutOfRange { index, len })?;
    *page = content;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
use crate::knowledge::{Character, Event, Relationship, Setting};

  fn three_page_book() -> Book {
    Book::new(
      "Three Pages",
      "Anon",
      BookFormat::Txt,
      vec![PageContent::text("a"), PageContent::text("b"), PageContent::text("c")],
    )
  }

  #[test]
  fn test_new_book_is_never_empty() {
    let book = Book::new("Empty", "Nobody", BookFormat::Txt, vec![]);
    assert_eq!(book.page_count(), 1);
    assert_eq!(book.id, "empty");
  }

  #[test]
  fn test_pdf_books_are_not_editable() {
    let book = Book::new("Scan", "Nobody", BookFormat::Pdf, vec![PageContent::text("x")]);
    assert!(!book.is_editable);
    assert!(three_page_book().is_editable);
  }

  #[test]
  fn test_html_takes_precedence() {
    let page = PageContent::text("plain").with_html("<p>rich</p>");
    assert_eq!(page.display(), "<p>rich</p>");
    let page = PageContent::text("plain").with_html("");
    assert_eq!(page.display(), "plain");
    assert_eq!(PageContent::text("plain").display(), "plain");
  }

  #[test]
  fn test_add_branch_validates() {
    let mut book = three_page_book();
    assert!(matches!(
      book.add_branch(Branch::new("empty", "Empty", 0, vec![])),
      Err(FolioError::InvalidBranch(_))
    ));
    assert!(matches!(
      book.add_branch(Branch::new("late", "Late", 3, vec![PageContent::text("x")])),
      Err(FolioError::InvalidBranch(_))
    ));
    assert!(matches!(
      book.add_branch(Branch::new("far", "Far", 1, vec![PageContent::text("x")]).with_reconnect(9)),
      Err(FolioError::InvalidBranch(_))
    ));

    book.add_branch(Branch::new("ok", "Ok", 2, vec![PageContent::text("x")])).unwrap();
    assert!(matches!(
      book.add_branch(Branch::new("ok", "Again", 1, vec![PageContent::text("y")])),
      Err(FolioError::InvalidBranch(_))
    ));
    assert_eq!(book.branches.len(), 1);
  }

  #[test]
  fn test_replace_page() {
    let mut book = three_page_book();
    book.replace_page(1, PageContent::text("B")).unwrap();
    assert_eq!(book.pages[1].text, "B");
    assert_eq!(book.page_count(), 3);
    assert!(matches!(
      book.replace_page(3, PageContent::text("D")),
      Err(FolioError::OutOfRange { index: 3, len: 3 })
    ));

    let mut pdf = Book::new("Scan", "Anon", BookFormat::Pdf, vec![PageContent::text("a")]);
    let result = pdf.replace_page(0, PageContent::text("b"));
    assert!(matches!(result, Err(FolioError::NotEditable(_))));
    assert_eq!(pdf.pages[0].text, "a");
  }

  #[test]
  fn test_format_from_extension() {
    assert_eq!(BookFormat::from_extension("TXT"), Some(BookFormat::Txt));
    assert_eq!(BookFormat::from_extension("htm"), Some(BookFormat::Html));
    assert_eq!("epub".parse::<BookFormat>().unwrap(), BookFormat::Epub);
    assert!("mobi".parse::<BookFormat>().is_err());
    assert_eq!(BookFormat::Docx.to_string(), "docx");
  }

  #[test]
  fn test_book_serde_defaults() {
    let json = r#"{
      "id": "x", "title": "X", "author": "Y", "format": "txt",
      "added": "2024-01-01T00:00:00Z", "pages": [{ "text": "hi" }]
    }"#;
    let book: Book = serde_json::from_str(json).unwrap();
    assert!(book.chapters.is_empty());
    assert!(book.branches.is_empty());
    assert!(book.characters.is_empty());
    assert!(book.relationships.is_empty());
    assert!(!book.is_editable);
    assert_eq!(book.pages[0].html, None);
  }
}

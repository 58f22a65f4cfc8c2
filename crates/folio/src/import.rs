//! File import for supported formats.
//!
//! Each supported format is split into pages differently:
//!
//! - `txt`: blank-line separated blocks of text, each rendered to simple HTML
//! - `html`: split wherever an `<h1>` to `<h3>` heading starts
//! - `pdf`: one page per PDF page, using the document's own text
//!
//! EPUB, DOCX and RTF are recognised but cannot be imported and are reported as
//! [`FolioError::UnsupportedFormat`], as is any unknown extension.
//!
//! After splitting, chapters are detected with [`extraction::extract_chapters`].
//!
//! # Examples
//!
//! ```
//! use folio::{config::ExtractionConfig, import, prelude::*};
//!
//! let text = "CHAPTER ONE\nIt began.\n\nIt went on.\n\nCHAPTER TWO\nIt ended.";
//! let config = ExtractionConfig::default();
//! let book = import::import_bytes("Tiny", BookFormat::Txt, text.as_bytes(), &config)?;
//! assert_eq!(book.page_count(), 3);
//! assert_eq!(book.chapters.len(), 2);
//! # Ok::<(), FolioError>(())
//! ```

use lopdf::{Dictionary, Document};

use super::*;

lazy_static! {
  /// Blank line separating two text pages.
  static ref BLANK_LINE: Regex = Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid blank line regex");
  /// Start of an `<h1>` to `<h3>` element.
  static ref HEADING_START: Regex = Regex::new(r"(?i)<h[1-3][\s>]").expect("valid heading regex");
  /// Contents of the `<body>` element.
  static ref BODY: Regex = Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("valid body regex");
  /// Contents of the `<title>` element.
  static ref TITLE: Regex =
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex");
}

/// Author recorded when a document does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Imports the file at `path` as a book.
///
/// The format is chosen from the file extension and the title defaults to the file stem.
///
/// # Errors
///
/// Returns [`FolioError::UnsupportedFormat`] for formats that cannot be imported, and
/// I/O or PDF errors if the file cannot be read or parsed.
pub async fn import_file(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<Book> {
  let path = path.as_ref();
  let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
  let format = BookFormat::from_extension(extension)
    .ok_or_else(|| FolioError::UnsupportedFormat(path.display().to_string()))?;
  let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled").to_string();

  debug!("Reading {} as {format}", path.display());
  let bytes = tokio::fs::read(path).await?;
  let book = import_bytes(&title, format, &bytes, config)?;
  info!(
    "Imported {} as {} ({} pages, {} chapters)",
    path.display(),
    book.id,
    book.page_count(),
    book.chapters.len()
  );
  Ok(book)
}

/// Imports `bytes` of the given `format` as a book titled `title`.
///
/// Titles and authors found in the document itself (HTML `<title>`, PDF metadata)
/// take precedence over `title`.
///
/// # Errors
///
/// Returns [`FolioError::UnsupportedFormat`] for EPUB, DOCX and RTF, and
/// [`FolioError::Lopdf`] for unreadable PDFs.
pub fn import_bytes(
  title: &str,
  format: BookFormat,
  bytes: &[u8],
  config: &ExtractionConfig,
) -> Result<Book> {
  let (title, author, pages) = match format {
    BookFormat::Txt => {
      let text = String::from_utf8_lossy(bytes);
      (title.to_string(), UNKNOWN_AUTHOR.to_string(), split_text(&text))
    },
    BookFormat::Html => {
      let html = String::from_utf8_lossy(bytes);
      let title = html_title(&html).unwrap_or_else(|| title.to_string());
      (title, UNKNOWN_AUTHOR.to_string(), split_html(&html))
    },
    BookFormat::Pdf => {
      let pdf = read_pdf(bytes)?;
      (
        pdf.title.unwrap_or_else(|| title.to_string()),
        pdf.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        pdf.pages,
      )
    },
    BookFormat::Epub | BookFormat::Docx | BookFormat::Rtf =>
      return Err(FolioError::UnsupportedFormat(format.to_string())),
  };

  let book = Book::new(title, author, format, pages);
  let chapters = extraction::extract_chapters(&book, config);
  Ok(book.with_chapters(chapters))
}

/// Splits plain text into pages at blank lines.
///
/// Always returns at least one page; empty input gives a single empty page.
///
/// ```
/// use folio::import::split_text;
///
/// let pages = split_text("one\n\n\n  two\r\n\r\nthree");
/// assert_eq!(pages.len(), 3);
/// assert_eq!(pages[1].text, "two");
/// assert_eq!(pages[1].html.as_deref(), Some("<p>two</p>"));
/// assert_eq!(split_text("").len(), 1);
/// ```
pub fn split_text(text: &str) -> Vec<PageContent> {
  let pages: Vec<PageContent> = BLANK_LINE
    .split(text)
    .map(str::trim)
    .filter(|chunk| !chunk.is_empty())
    .map(PageContent::from_text)
    .collect();
  if pages.is_empty() {
    vec![PageContent::from_text("")]
  } else {
    pages
  }
}

/// Splits an HTML document into pages at each `<h1>` to `<h3>` heading.
///
/// Only the `<body>` is used when the document has one. Content before the first
/// heading becomes a page of its own.
pub fn split_html(html: &str) -> Vec<PageContent> {
  let body = BODY.captures(html).and_then(|c| c.get(1)).map_or(html, |m| m.as_str());

  let mut starts: Vec<usize> = HEADING_START.find_iter(body).map(|m| m.start()).collect();
  if starts.first() != Some(&0) {
    starts.insert(0, 0);
  }
  starts.push(body.len());

  let pages: Vec<PageContent> = starts
    .windows(2)
    .map(|w| body[w[0]..w[1]].trim())
    .filter(|chunk| !chunk.is_empty())
    .map(PageContent::from_html)
    .collect();
  trace!("Split HTML into {} pages", pages.len());
  if pages.is_empty() {
    vec![PageContent::from_html("")]
  } else {
    pages
  }
}

/// Text of the document's `<title>` element, if it has a non-empty one.
fn html_title(html: &str) -> Option<String> {
  let title = format::strip_tags(TITLE.captures(html)?.get(1)?.as_str());
  let title = title.lines().collect::<Vec<_>>().join(" ");
  (!title.trim().is_empty()).then(|| title.trim().to_string())
}

/// What a PDF yields on import.
#[derive(Debug, Default)]
struct PdfContent {
  /// Title from the document information dictionary
  title:  Option<String>,
  /// Author from the document information dictionary
  author: Option<String>,
  /// One page per PDF page
  pages:  Vec<PageContent>,
}

/// Loads a PDF and extracts its metadata and the text of each page.
///
/// Pages whose text cannot be extracted are kept as empty pages so page numbers still
/// line up with the PDF's.
fn read_pdf(bytes: &[u8]) -> Result<PdfContent> {
  let doc = Document::load_mem(bytes)?;

  let info = doc
    .trailer
    .get(b"Info")
    .ok()
    .and_then(|o| o.as_reference().ok())
    .and_then(|reference| doc.get_object(reference).and_then(|obj| obj.as_dict()).ok());

  let pages = doc
    .get_pages()
    .into_keys()
    .map(|number| match doc.extract_text(&[number]) {
      Ok(text) => PageContent::from_text(text.trim()),
      Err(e) => {
        warn!("Could not extract text of PDF page {number}: {e}");
        PageContent::from_text("")
      },
    })
    .collect();

  Ok(PdfContent {
    title: info.and_then(|dict| text_from_dict(dict, "Title")),
    author: info.and_then(|dict| text_from_dict(dict, "Author")),
    pages,
  })
}

/// A non-empty string entry of a PDF dictionary, decoding UTF-16BE strings.
fn text_from_dict(dict: &Dictionary, key: &str) -> Option<String> {
  let bytes = dict.get(key.as_bytes()).ok()?.as_str().ok()?;
  let text = if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
    encoding_rs::UTF_16BE.decode(utf16).0.into_owned()
  } else {
    String::from_utf8_lossy(bytes).into_owned()
  };
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_string())
}

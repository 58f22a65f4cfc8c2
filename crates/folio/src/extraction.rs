//! Chapter detection for imported content.
//!
//! Chapters are found page by page:
//!
//! - A page whose HTML opens with an `<h1>`–`<h3>` heading becomes a chapter titled
//!   with the heading's text.
//! - Otherwise, unless the book was imported from HTML, a page becomes a chapter when
//!   the first line of its text looks like a title: it starts with `Chapter`, `Section`
//!   or `Part` and a number, or it is short and either all upper case or title case.
//!
//! When nothing is detected in a multi-page book, evenly spaced `Section N` chapters are
//! created instead so the book can still be navigated by chapter.
//!
//! Detected chapters start on distinct pages in ascending order, which is what
//! [`PaginationIndex`](crate::pagination::PaginationIndex) expects.

use super::*;

lazy_static! {
  /// An `<h1>` to `<h3>` element, capturing its inner HTML.
  static ref HEADING: Regex =
    Regex::new(r"(?i)<h[1-3][^>]*>(.*?)</h[1-3]>").expect("valid heading regex");
  /// A numbered chapter, section or part line.
  static ref NUMBERED_TITLE: Regex =
    Regex::new(r"(?i)^(chapter|section|part)\s+\d+").expect("valid title regex");
}

/// How many leading characters of an HTML page are searched for an opening heading.
const HEADING_WINDOW: usize = 100;

/// Returns the chapters of `book`.
///
/// Chapters already on the book are returned unchanged. Otherwise chapters are
/// detected from the pages, falling back to `Section N` chapters every
/// `max(1, pages / config.sections)` pages when nothing is detected and the book has
/// more than one page.
pub fn extract_chapters(book: &Book, config: &ExtractionConfig) -> Vec<Chapter> {
  if !book.chapters.is_empty() {
    trace!("{} already has {} chapters", book.id, book.chapters.len());
    return book.chapters.clone();
  }

  let mut chapters: Vec<Chapter> = book
    .pages
    .iter()
    .enumerate()
    .filter_map(|(index, page)| {
      let title = match page.html.as_deref().and_then(heading_title) {
        Some(title) => title,
        None if book.format != BookFormat::Html => text_title(&page.text, config.title_max_len)?,
        None => return None,
      };
      Some(Chapter::new(format!("chapter-{index}"), title, index))
    })
    .collect();

  if chapters.is_empty() && book.pages.len() > 1 {
    chapters = fallback_sections(book.pages.len(), config.sections);
    debug!("No chapters detected in {}, created {} sections", book.id, chapters.len());
  } else {
    debug!("Detected {} chapters in {}", chapters.len(), book.id);
  }
  chapters
}

/// Title of the heading opening an HTML page, if any.
fn heading_title(html: &str) -> Option<String> {
  let trimmed = html.trim();
  let window: String = trimmed.chars().take(HEADING_WINDOW).collect();
  if !HEADING.is_match(&window) {
    return None;
  }
  let inner = HEADING.captures(trimmed)?.get(1)?.as_str();
  if inner.is_empty() {
    return None;
  }
  let title = format::strip_tags(inner).lines().collect::<Vec<_>>().join(" ");
  Some(title.trim().to_string())
}

/// The first line of a text page, if it reads like a chapter title.
fn text_title(text: &str, title_max_len: usize) -> Option<String> {
  let first_line = text.lines().next()?.trim();
  if first_line.is_empty() {
    return None;
  }
  let numbered = NUMBERED_TITLE.is_match(first_line);
  let short = first_line.chars().count() < title_max_len;
  let upper_case = !first_line.chars().any(char::is_lowercase);
  let title_case = first_line
    .split(' ')
    .all(|word| word.chars().next().map_or(true, |c| !c.is_lowercase()));
  (numbered || (short && (upper_case || title_case))).then(|| first_line.to_string())
}

/// Evenly spaced `Section N` chapters for a book of `page_count` pages.
fn fallback_sections(page_count: usize, sections: usize) -> Vec<Chapter> {
  let interval = (page_count / sections.max(1)).max(1);
  (0..page_count)
    .step_by(interval)
    .enumerate()
    .map(|(n, page_index)| {
      Chapter::new(format!("section-{}", n + 1), format!("Section {}", n + 1), page_index)
    })
    .collect()
}

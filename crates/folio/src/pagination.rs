//! Chapter and page-range queries over a book's main timeline.
//!
//! A book's chapters each name the first page they cover. Everything else, such as
//! which chapter a page belongs to or which pages a chapter spans, is derived here
//! so that every caller shares one set of boundary rules:
//!
//! - A page belongs to the **last** chapter starting at or before it.
//! - A chapter ends on the page before the next chapter starts, or on the book's last
//!   page if it is the last chapter.
//! - A range never ends before it starts. Consecutive chapters pointing at the same page
//!   yield single-page ranges rather than negative ones.
//!
//! A book without chapters is a normal state: lookups by page return `None` and only
//! lookups by an explicit chapter reference fail.
//!
//! # Examples
//!
//! ```
//! use folio::prelude::*;
//!
//! let pages = (0..5).map(|i| PageContent::text(format!("page {i}"))).collect();
//! let book = Book::new("Five", "Anon", BookFormat::Txt, pages)
//!   .with_chapters(vec![Chapter::new("one", "One", 0), Chapter::new("two", "Two", 3)]);
//!
//! let index = PaginationIndex::new(&book);
//! assert_eq!(index.chapter_containing(4).map(|c| c.id.as_str()), Some("two"));
//! assert_eq!(index.page_range_of(&book.chapters[0])?, (0, 2));
//! assert_eq!(index.page_indices_of(&book.chapters[1])?.iter().collect::<Vec<_>>(), vec![3, 4]);
//! # Ok::<(), FolioError>(())
//! ```

use std::ops::RangeInclusive;

use super::*;

/// Read-only view answering chapter and page-range questions about one book.
#[derive(Debug, Clone, Copy)]
pub struct PaginationIndex<'a> {
  /// The book being indexed
  book: &'a Book,
}

/// The chapter a page belongs to, and whether the page opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterPosition<'a> {
  /// Chapter containing the page
  pub chapter:          &'a Chapter,
  /// Whether the page is the chapter's first page
  pub is_chapter_start: bool,
}

/// The pages of one chapter, `start..=end`.
///
/// Iteration is lazy and restartable: every call to [`PageIndices::iter`] (or every
/// `for` loop over `&PageIndices`) starts again from the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndices {
  /// First page, inclusive
  start: usize,
  /// Last page, inclusive
  end:   usize,
}

impl PageIndices {
  /// First page of the range.
  pub fn start(&self) -> usize { self.start }

  /// Last page of the range, inclusive.
  pub fn end(&self) -> usize { self.end }

  /// Number of pages in the range, never zero.
  pub fn len(&self) -> usize { self.end - self.start + 1 }

  /// Always `false`: a chapter covers at least its own first page.
  pub fn is_empty(&self) -> bool { false }

  /// Whether `page_index` falls inside the range.
  pub fn contains(&self, page_index: usize) -> bool { (self.start..=self.end).contains(&page_index) }

  /// Iterates the page indices from the start.
  pub fn iter(&self) -> RangeInclusive<usize> { self.start..=self.end }
}

impl IntoIterator for PageIndices {
  type IntoIter = RangeInclusive<usize>;
  type Item = usize;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl IntoIterator for &PageIndices {
  type IntoIter = RangeInclusive<usize>;
  type Item = usize;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a> PaginationIndex<'a> {
  /// Creates an index over `book`.
  pub fn new(book: &'a Book) -> Self { Self { book } }

  /// Finds the chapter a page belongs to.
  ///
  /// The result is the last chapter, in sequence order, whose first page is at or
  /// before `page_index`. Indices past the end of the book therefore resolve to the
  /// last chapter. If two chapters share a first page the later one wins.
  ///
  /// Returns `None` when the book has no chapters or `page_index` precedes the first
  /// chapter.
  pub fn chapter_containing(&self, page_index: usize) -> Option<&'a Chapter> {
    let chapter = self.book.chapters.iter().rev().find(|c| c.page_index <= page_index);
    trace!("Page {page_index} of {} is in chapter {:?}", self.book.id, chapter.map(|c| &c.id));
    chapter
  }

  /// Like [`chapter_containing`](Self::chapter_containing), also reporting whether
  /// the page is the first page of its chapter.
  pub fn chapter_at(&self, page_index: usize) -> Option<ChapterPosition<'a>> {
    self
      .chapter_containing(page_index)
      .map(|chapter| ChapterPosition { chapter, is_chapter_start: chapter.page_index == page_index })
  }

  /// Returns the first and last page (both inclusive) covered by `chapter`.
  ///
  /// `chapter` is matched by id, and the book's own copy of it supplies the first page.
  /// The last page is the page before the next chapter's first page, or the book's
  /// last page for the final chapter. It is clamped to be no earlier than the first
  /// page.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] if `chapter` is not one of the book's chapters.
  pub fn page_range_of(&self, chapter: &Chapter) -> Result<(usize, usize)> {
    let position = self.position_of(chapter)?;
    let start = self.book.chapters[position].page_index;
    let end = match self.book.chapters.get(position + 1) {
      Some(next) => next.page_index.saturating_sub(1),
      None => self.book.pages.len().saturating_sub(1),
    };
    if end < start {
      debug!(
        "Clamping range of chapter {} in {}: next boundary {end} precedes start {start}",
        chapter.id, self.book.id
      );
    }
    Ok((start, end.max(start)))
  }

  /// Returns the pages covered by `chapter` as a lazy, restartable sequence.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] if `chapter` is not one of the book's chapters.
  pub fn page_indices_of(&self, chapter: &Chapter) -> Result<PageIndices> {
    let (start, end) = self.page_range_of(chapter)?;
    Ok(PageIndices { start, end })
  }

  /// Number of pages covered by `chapter`, at least one.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] if `chapter` is not one of the book's chapters.
  pub fn page_count_of(&self, chapter: &Chapter) -> Result<usize> {
    Ok(self.page_indices_of(chapter)?.len())
  }

  /// Position of `chapter` within the book's chapter list, matched by id.
  fn position_of(&self, chapter: &Chapter) -> Result<usize> {
    self.book.chapters.iter().position(|c| c.id == chapter.id).ok_or_else(|| {
      FolioError::NotFound(format!("chapter {} in book {}", chapter.id, self.book.id))
    })
  }
}

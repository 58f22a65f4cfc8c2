//! Reading session state and navigation.
//!
//! A [`ReadingSession`] is the explicit form of what a reader front end tracks while a
//! book is open: the current page and which timeline is being read. It has two states:
//!
//! - [`Timeline::Main`], reading the book's own pages
//! - [`Timeline::Branch`], reading an alternate branch from its branch point on
//!
//! Only [`ReadingSession::select_branch`] and [`ReadingSession::deselect_branch`] move
//! between the two. Paging never switches timelines on its own, not even when a branch's
//! reconnect page is reached.
//!
//! All page content and bounds come from [`BranchResolver`] and chapter lookups from
//! [`PaginationIndex`]; the session only keeps state.
//!
//! # Examples
//!
//! ```
//! use folio::{prelude::*, session::ReadingSession};
//!
//! let pages = (0..6).map(|i| PageContent::text(format!("page {i}"))).collect();
//! let mut book = Book::new("Six", "Anon", BookFormat::Txt, pages);
//! book.add_branch(Branch::new("alt", "Alt", 2, vec![PageContent::text("alt 0")]))?;
//!
//! let mut session = ReadingSession::new(&book);
//! session.select_branch("alt")?;
//! assert_eq!(session.position(), 2);
//! assert_eq!(session.content()?.text, "alt 0");
//! assert_eq!(session.next(), 2); // last page of the branch
//! # Ok::<(), FolioError>(())
//! ```

use crate::{
  branch::BranchResolver,
  pagination::{ChapterPosition, PageIndices, PaginationIndex},
};

use super::*;

/// Which page sequence a session reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline<'a> {
  /// The book's own pages
  Main,
  /// An alternate branch, from its branch point on
  Branch(&'a Branch),
}

/// Navigation state for one reader of one book.
#[derive(Debug, Clone)]
pub struct ReadingSession<'a> {
  /// Book being read
  book:     &'a Book,
  /// Current page, always below [`ReadingSession::total_pages`]
  position: usize,
  /// Timeline pages are read from
  timeline: Timeline<'a>,
}

impl<'a> ReadingSession<'a> {
  /// Opens `book` on its first page on the main timeline.
  pub fn new(book: &'a Book) -> Self { Self { book, position: 0, timeline: Timeline::Main } }

  /// The book being read.
  pub fn book(&self) -> &'a Book { self.book }

  /// Current page index.
  pub fn position(&self) -> usize { self.position }

  /// Current timeline.
  pub fn timeline(&self) -> Timeline<'a> { self.timeline }

  /// The branch being read, if any.
  pub fn active_branch(&self) -> Option<&'a Branch> {
    match self.timeline {
      Timeline::Main => None,
      Timeline::Branch(branch) => Some(branch),
    }
  }

  /// Resolver for the current timeline.
  pub fn resolver(&self) -> BranchResolver<'a> {
    BranchResolver::new(self.book, self.active_branch())
  }

  /// Number of pages reachable on the current timeline.
  pub fn total_pages(&self) -> usize { self.resolver().total_pages() }

  /// Switches to the branch with id `branch_id` and jumps to its branch point.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] if the book has no such branch. The session is
  /// left unchanged.
  pub fn select_branch(&mut self, branch_id: &str) -> Result<()> {
    let branch = self
      .book
      .branch(branch_id)
      .ok_or_else(|| FolioError::NotFound(format!("branch {branch_id} in book {}", self.book.id)))?;
    debug!(
      "Entering branch {} of {} at page {}",
      branch.id, self.book.id, branch.branch_point_page_index
    );
    self.timeline = Timeline::Branch(branch);
    self.position = branch.branch_point_page_index;
    Ok(())
  }

  /// Returns to the main timeline, keeping the current page when it exists there and
  /// otherwise moving to the book's last page.
  pub fn deselect_branch(&mut self) {
    if let Timeline::Branch(branch) = self.timeline {
      debug!("Leaving branch {} of {} at page {}", branch.id, self.book.id, self.position);
    }
    self.timeline = Timeline::Main;
    self.position = self.position.min(self.book.pages.len().saturating_sub(1));
  }

  /// Moves to the next page, staying put on the last one. Returns the new position.
  pub fn next(&mut self) -> usize {
    self.position = BranchResolver::next(self.position, self.total_pages());
    self.position
  }

  /// Moves to the previous page, staying put on the first one. Returns the new position.
  pub fn previous(&mut self) -> usize {
    self.position = BranchResolver::previous(self.position);
    self.position
  }

  /// Jumps to `page_index` on the current timeline.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::OutOfRange`] if the page is not reachable on the current
  /// timeline. The session is left unchanged.
  pub fn select_page(&mut self, page_index: usize) -> Result<()> {
    let total = self.total_pages();
    if page_index >= total {
      return Err(FolioError::OutOfRange { index: page_index, len: total });
    }
    self.position = page_index;
    Ok(())
  }

  /// Jumps to the first page of the chapter with id `chapter_id`, returning the pages
  /// the chapter covers.
  ///
  /// Chapters describe the main timeline; inside a branch the jump only succeeds when
  /// the chapter starts at a page the branch can reach.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::NotFound`] for an unknown chapter and
  /// [`FolioError::OutOfRange`] if its first page is not reachable.
  pub fn select_chapter(&mut self, chapter_id: &str) -> Result<PageIndices> {
    let chapter = self.book.chapter(chapter_id).ok_or_else(|| {
      FolioError::NotFound(format!("chapter {chapter_id} in book {}", self.book.id))
    })?;
    let pages = PaginationIndex::new(self.book).page_indices_of(chapter)?;
    self.select_page(pages.start())?;
    Ok(pages)
  }

  /// Content of the current page.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::OutOfRange`] only if the book's pages no longer cover the
  /// current position.
  pub fn content(&self) -> Result<&'a PageContent> { self.resolver().content_at(self.position) }

  /// Chapter of the current page, if the book has one covering it.
  ///
  /// Pages read from a branch report the main-timeline chapter they fall in.
  pub fn chapter(&self) -> Option<ChapterPosition<'a>> {
    PaginationIndex::new(self.book).chapter_at(self.position)
  }

  /// Branches that can be entered from the current page.
  pub fn branches_here(&self) -> Vec<&'a Branch> {
    self.resolver().branches_at(self.position).collect()
  }

  /// The main-timeline page the active branch rejoins at, when on the branch's last page.
  pub fn reconnect_notice(&self) -> Option<usize> { self.resolver().reconnect_at(self.position) }
}

//! Page addressing while a story branch may be active.
//!
//! On the main timeline page `n` is simply `book.pages[n]`. With a branch active the
//! addressable pages are everything before the branch point, taken from the main
//! timeline, followed by the branch's own pages:
//!
//! ```text
//! main:    p0 p1 p2 p3 p4 p5 p6 p7 p8
//! branch:              b0 b1 b2            (branch point 4)
//! active:  p0 p1 p2 p3 b0 b1 b2            (7 pages)
//! ```
//!
//! Main-timeline pages beyond the branch point are unreachable while the branch is
//! active. Reaching a branch's reconnect page does not switch back to the main
//! timeline; it is only reported through [`BranchResolver::reconnect_at`].
//!
//! Navigation with [`BranchResolver::next`] and [`BranchResolver::previous`] saturates
//! at both ends instead of failing or wrapping.

use super::*;

/// Resolves page content and page counts for a book and an optional active branch.
#[derive(Debug, Clone, Copy)]
pub struct BranchResolver<'a> {
  /// Book whose main timeline is addressed
  book:   &'a Book,
  /// Branch replacing the main timeline from its branch point on
  active: Option<&'a Branch>,
}

impl<'a> BranchResolver<'a> {
  /// Creates a resolver for `book` with `active` as the current branch, if any.
  pub fn new(book: &'a Book, active: Option<&'a Branch>) -> Self { Self { book, active } }

  /// The active branch, if any.
  pub fn active(&self) -> Option<&'a Branch> { self.active }

  /// Number of addressable pages.
  ///
  /// On the main timeline this is the book's page count. With a branch active it is
  /// `branch_point_page_index + content.len()`, regardless of how many pages the main
  /// timeline has.
  pub fn total_pages(&self) -> usize {
    match self.active {
      Some(branch) => branch.end_page_index(),
      None => self.book.pages.len(),
    }
  }

  /// Content of the page at `page_index`.
  ///
  /// With a branch active and `page_index` at or past its branch point, the page comes
  /// from the branch at the branch-local index `page_index - branch_point_page_index`.
  /// Otherwise it comes from the main timeline.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::OutOfRange`] if the resolved index lies outside the
  /// addressed content. For branch pages the error carries the branch-local index
  /// and the branch's length.
  pub fn content_at(&self, page_index: usize) -> Result<&'a PageContent> {
    match self.active {
      Some(branch) if page_index >= branch.branch_point_page_index => {
        let local = page_index - branch.branch_point_page_index;
        trace!("Page {page_index} resolves to page {local} of branch {}", branch.id);
        branch
          .content
          .get(local)
          .ok_or(FolioError::OutOfRange { index: local, len: branch.content.len() })
      },
      _ => self
        .book
        .pages
        .get(page_index)
        .ok_or(FolioError::OutOfRange { index: page_index, len: self.book.pages.len() }),
    }
  }

  /// The page after `current`, or `current` itself if it is already the last of
  /// `total_pages`.
  pub fn next(current: usize, total_pages: usize) -> usize {
    match current.checked_add(1) {
      Some(next) if next < total_pages => next,
      _ => current,
    }
  }

  /// The page before `current`, or `current` itself if it is already the first.
  pub fn previous(current: usize) -> usize { current.saturating_sub(1) }

  /// Whether any branch of the book diverges at `page_index`.
  pub fn is_branch_point(&self, page_index: usize) -> bool {
    self.book.branches.iter().any(|b| b.branch_point_page_index == page_index)
  }

  /// All branches diverging at `page_index`, in the book's branch order.
  pub fn branches_at(&self, page_index: usize) -> impl Iterator<Item = &'a Branch> + 'a {
    self.book.branches.iter().filter(move |b| b.branch_point_page_index == page_index)
  }

  /// The main-timeline page the active branch rejoins at, reported on the branch's
  /// last page only.
  ///
  /// This is informational: navigation stays inside the branch.
  pub fn reconnect_at(&self, page_index: usize) -> Option<usize> {
    let branch = self.active?;
    let reconnect = branch.reconnect_page_index?;
    (page_index.checked_add(1) == Some(branch.end_page_index())).then_some(reconnect)
  }
}

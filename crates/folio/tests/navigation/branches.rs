use super::*;

fn branch(point: usize, len: usize) -> Branch {
  let content = (0..len).map(|i| PageContent::text(format!("b{i}"))).collect();
  Branch::new(format!("at-{point}-{len}"), "Branch", point, content)
}

#[test]
fn test_total_pages_ignores_main_length() -> TestResult<()> {
  for page_count in [5, 9, 40] {
    let mut book = book_with_chapters(page_count, &[0]);
    book.add_branch(branch(4, 3))?;
    let resolver = BranchResolver::new(&book, book.branches.first());
    assert_eq!(resolver.total_pages(), 7);
  }
  Ok(())
}

#[test]
fn test_branch_scenario() -> TestResult<()> {
  let mut book = book_with_chapters(9, &[0]);
  book.add_branch(branch(4, 3))?;
  let resolver = BranchResolver::new(&book, book.branches.first());

  assert_eq!(resolver.content_at(4)?.text, "b0");
  assert_ne!(resolver.content_at(4)?, &book.pages[4]);
  assert_eq!(resolver.content_at(6)?.text, "b2");
  assert!(matches!(resolver.content_at(7), Err(FolioError::OutOfRange { .. })));
  assert_eq!(BranchResolver::next(6, resolver.total_pages()), 6);
  Ok(())
}

#[test]
fn test_navigation_converges() {
  for total in [1, 2, 7, 30] {
    for start in 0..total {
      let mut page = start;
      for _ in 0..total + 3 {
        page = BranchResolver::next(page, total);
      }
      assert_eq!(page, total - 1);
      assert_eq!(BranchResolver::next(page, total), page);

      for _ in 0..total + 3 {
        page = BranchResolver::previous(page);
      }
      assert_eq!(page, 0);
      assert_eq!(BranchResolver::previous(page), 0);
    }
  }
}

#[traced_test]
#[test]
fn test_session_walks_a_branch() -> TestResult<()> {
  let mut book = book_with_chapters(9, &[0, 3, 6]);
  book.add_branch(branch(4, 3).with_reconnect(8))?;
  let branch_id = book.branches[0].id.clone();

  let mut session = ReadingSession::new(&book);
  session.select_chapter("c1")?;
  while session.branches_here().is_empty() {
    session.next();
  }
  assert_eq!(session.position(), 4);

  session.select_branch(&branch_id)?;
  let mut seen = vec![session.content()?.text.clone()];
  while session.next() + 1 < session.total_pages() {
    seen.push(session.content()?.text.clone());
  }
  seen.push(session.content()?.text.clone());
  assert_eq!(seen, vec!["b0", "b1", "b2"]);
  assert_eq!(session.reconnect_notice(), Some(8));
  assert!(matches!(session.timeline(), Timeline::Branch(_)));
  assert_eq!(session.chapter().map(|c| c.chapter.id.as_str()), Some("c2"));

  session.deselect_branch();
  assert_eq!(session.timeline(), Timeline::Main);
  assert_eq!(session.content()?.text, "page 6");
  Ok(())
}

#[test]
fn test_invalid_branches_are_rejected() {
  let mut book = book_with_chapters(3, &[0]);
  assert!(matches!(book.add_branch(branch(3, 1)), Err(FolioError::InvalidBranch(_))));
  assert!(matches!(book.add_branch(branch(1, 0)), Err(FolioError::InvalidBranch(_))));
  assert!(matches!(
    book.add_branch(branch(1, 1).with_reconnect(3)),
    Err(FolioError::InvalidBranch(_))
  ));
  assert!(book.branches.is_empty());
}

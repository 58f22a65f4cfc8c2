use super::*;

/// Chapter layouts satisfying the chapter invariants, as (page count, chapter starts).
fn layouts() -> Vec<(usize, Vec<usize>)> {
  vec![
    (1, vec![0]),
    (3, vec![0, 1, 2]),
    (10, vec![0]),
    (10, vec![0, 9]),
    (10, vec![0, 3, 7]),
    (25, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]),
    (100, vec![0, 1, 50, 98]),
  ]
}

#[test]
fn test_chapter_ranges_partition_pages() -> TestResult<()> {
  for (page_count, starts) in layouts() {
    let book = book_with_chapters(page_count, &starts);
    let index = PaginationIndex::new(&book);

    let mut covered = Vec::new();
    for chapter in &book.chapters {
      covered.extend(index.page_indices_of(chapter)?);
    }
    assert_eq!(covered, (0..page_count).collect::<Vec<_>>(), "layout {starts:?}");
  }
  Ok(())
}

#[test]
fn test_chapter_ranges_are_monotonic() -> TestResult<()> {
  let layouts = layouts().into_iter().chain([(4, vec![0, 2, 2, 3]), (2, vec![0, 1, 1])]);
  for (page_count, starts) in layouts {
    let book = book_with_chapters(page_count, &starts);
    let index = PaginationIndex::new(&book);
    for chapter in &book.chapters {
      let (start, end) = index.page_range_of(chapter)?;
      assert!(end >= start, "chapter {} of {starts:?}", chapter.id);
    }
  }
  Ok(())
}

#[test]
fn test_containing_chapter_covers_page() -> TestResult<()> {
  for (page_count, starts) in layouts() {
    let book = book_with_chapters(page_count, &starts);
    let index = PaginationIndex::new(&book);
    for page in 0..page_count {
      let chapter = index.chapter_containing(page).ok_or("every page has a chapter")?;
      assert!(index.page_indices_of(chapter)?.contains(page));
    }
  }
  Ok(())
}

#[test]
fn test_three_single_page_chapters() -> TestResult<()> {
  let book = book_with_chapters(3, &[0, 1, 2]);
  let index = PaginationIndex::new(&book);
  let b = &book.chapters[1];
  assert_eq!(index.page_range_of(b)?, (1, 1));
  assert_eq!(index.chapter_containing(1), Some(b));
  assert_eq!(index.chapter_containing(5).map(|c| c.id.as_str()), Some("c2"));
  Ok(())
}

#[test]
fn test_book_without_chapters() {
  let book = book_with_chapters(10, &[]);
  let index = PaginationIndex::new(&book);
  assert_eq!(index.chapter_containing(5), None);
  assert!(index.chapter_at(0).is_none());
}

#[test]
fn test_duplicate_chapter_starts_clamp() -> TestResult<()> {
  let book = book_with_chapters(6, &[0, 2, 2, 4]);
  let index = PaginationIndex::new(&book);
  assert_eq!(index.page_range_of(&book.chapters[1])?, (2, 2));
  assert_eq!(index.page_range_of(&book.chapters[2])?, (2, 3));
  assert_eq!(index.chapter_containing(2).map(|c| c.id.as_str()), Some("c2"));
  Ok(())
}

#[test]
fn test_unknown_chapter_is_not_found() {
  let book = book_with_chapters(3, &[0]);
  let stranger = Chapter::new("elsewhere", "Elsewhere", 1);
  let index = PaginationIndex::new(&book);
  assert!(matches!(index.page_range_of(&stranger), Err(FolioError::NotFound(_))));
  assert!(matches!(index.page_count_of(&stranger), Err(FolioError::NotFound(_))));
}

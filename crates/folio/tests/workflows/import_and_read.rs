use super::*;

const NOVEL: &str = "CHAPTER ONE\nIt was a dark and stormy night.\n\nthe rain fell in torrents\n\n\
                     CHAPTER TWO\nMorning came.\n\nthe sun rose\n\nthe birds sang\n";

#[traced_test]
#[tokio::test]
async fn test_import_text_and_read_by_chapter() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("Stormy Night.txt");
  tokio::fs::write(&path, NOVEL).await?;

  let book = import::import_file(&path, &ExtractionConfig::default()).await?;
  assert_eq!(book.title, "Stormy Night");
  assert_eq!(book.page_count(), 5);
  let titles: Vec<_> = book.chapters.iter().map(|c| c.title.as_str()).collect();
  assert_eq!(titles, vec!["CHAPTER ONE", "CHAPTER TWO"]);

  let index = PaginationIndex::new(&book);
  assert_eq!(index.page_range_of(&book.chapters[0])?, (0, 1));
  assert_eq!(index.page_range_of(&book.chapters[1])?, (2, 4));

  let mut session = ReadingSession::new(&book);
  let pages = session.select_chapter(&book.chapters[1].id)?;
  assert_eq!(pages.len(), 3);
  assert_eq!(session.content()?.display(), "<p>CHAPTER TWO</p><p>Morning came.</p>");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_import_html_with_branch() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("story.html");
  let html = "<html><head><title>The Fork</title></head><body>\
              <h1>Start</h1><p>You stand at a fork.</p>\
              <h1>Left</h1><p>You go left.</p>\
              <h1>End</h1><p>Home again.</p></body></html>";
  tokio::fs::write(&path, html).await?;

  let mut book = import::import_file(&path, &ExtractionConfig::default()).await?;
  assert_eq!(book.id, "the-fork");
  assert_eq!(book.page_count(), 3);
  assert_eq!(book.chapters.len(), 3);

  let right = import::split_text("You go right.\n\nA bear appears.");
  book.add_branch(Branch::new("right", "Go right", 1, right).with_reconnect(2))?;

  let mut session = ReadingSession::new(&book);
  session.select_branch("right")?;
  assert_eq!(session.total_pages(), 3);
  assert_eq!(session.content()?.text, "You go right.");
  session.next();
  session.next();
  assert_eq!(session.content()?.text, "A bear appears.");
  assert_eq!(session.reconnect_notice(), Some(2));
  Ok(())
}

#[tokio::test]
async fn test_fallback_sections_for_plain_prose() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("prose.txt");
  let prose: Vec<String> = (0..20).map(|i| format!("paragraph number {i} goes here")).collect();
  tokio::fs::write(&path, prose.join("\n\n")).await?;

  let config = Config::default().with_sections(4);
  let book = import::import_file(&path, &config.extraction).await?;
  assert_eq!(book.page_count(), 20);
  let starts: Vec<_> = book.chapters.iter().map(|c| c.page_index).collect();
  assert_eq!(starts, vec![0, 5, 10, 15]);
  assert_eq!(book.chapters[3].title, "Section 4");
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_reading_pages_fills_knowledge() -> TestResult<()> {
  let (library, config, _dir) = create_test_library().await;
  let text = "Alice was curious.\n\nAlice went into the forest.\n\nAlice saw the Queen.";
  let mut book =
    import::import_bytes("Wonderland", BookFormat::Txt, text.as_bytes(), &config.extraction)?;
  library.add(&book).await?;

  let mut seen = Vec::new();
  {
    let mut session = ReadingSession::new(&book);
    for _ in 0..session.total_pages() {
      seen.push((session.position(), session.content()?.text.clone()));
      session.next();
    }
  }
  for (page, text) in &seen {
    knowledge::learn_from_page(&mut book, *page, text);
  }
  library.save(&book).await?;

  let stored = library.get("wonderland").await?;
  assert_eq!(stored.characters.len(), 1);
  assert_eq!(stored.settings[0].name, "the forest");
  assert_eq!(stored.events[0].page_index, 1);
  assert!(stored.relationships.is_empty());
  Ok(())
}

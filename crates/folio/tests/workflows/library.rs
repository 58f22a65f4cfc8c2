use super::*;

#[traced_test]
#[tokio::test]
async fn test_library_round_trip() -> TestResult<()> {
  let (library, config, _dir) = create_test_library().await;

  let mut book = import::import_bytes(
    "Round Trip",
    BookFormat::Txt,
    b"Chapter 1\nthere\n\nand back\n\nChapter 2\nagain",
    &config.extraction,
  )?;
  library.add(&book).await?;

  book.add_branch(
    Branch::new("detour", "Detour", 1, import::split_text("a detour"))
      .with_description("Take the long way"),
  )?;
  library.save(&book).await?;

  let stored = library.get(&book.id).await?;
  assert_eq!(stored, book);
  assert_eq!(stored.branches[0].description.as_deref(), Some("Take the long way"));

  let listed = library.list().await?;
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].chapters, book.chapters);
  Ok(())
}

#[tokio::test]
async fn test_library_rejects_duplicates_and_removes() -> TestResult<()> {
  let (library, config, _dir) = create_test_library().await;
  let book = import::import_bytes("Twice", BookFormat::Txt, b"once", &config.extraction)?;

  library.add(&book).await?;
  let err = library.add(&book).await.unwrap_err();
  assert!(matches!(err, FolioError::DuplicateBook(_)));

  library.remove("Twice").await?;
  assert!(matches!(library.get("twice").await, Err(FolioError::NotFound(_))));
  Ok(())
}

#[test]
fn test_config_points_at_library() -> TestResult<()> {
  let dir = tempdir()?;
  let path = dir.path().join("config.toml");
  let config = Config::default().with_library_path(&dir.path().join("books"));
  config.save(&path)?;
  assert_eq!(Config::load(&path)?.library_path, dir.path().join("books"));
  Ok(())
}

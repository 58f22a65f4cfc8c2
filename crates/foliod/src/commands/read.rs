//! Module for printing pages of a book.

use super::*;

/// Arguments for [`Commands::Read`]
#[derive(Args, Clone)]
pub struct ReadArgs {
  /// Book id or title
  pub book: String,

  /// Page to print, starting at 1. Applied after --chapter and --branch
  #[arg(long)]
  pub page: Option<usize>,

  /// Start of the chapter with this id
  #[arg(long)]
  pub chapter: Option<String>,

  /// Read the branch with this id instead of the main story
  #[arg(long)]
  pub branch: Option<String>,
}

/// Function for the [`Commands::Read`] in the CLI.
///
/// Without a page or chapter this prints the first page, or the branch point when a
/// branch is chosen. Characters, places and events mentioned on the page are added to
/// the book unless `learn_knowledge` is turned off.
pub async fn read<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  read_args: ReadArgs,
) -> Result<()> {
  let ReadArgs { book, page, chapter, branch } = read_args;
  let (config, library) = open_library(config_path).await?;
  let mut book = library.get(&book).await?;

  let (position, text) = {
    let mut session = ReadingSession::new(&book);
    if let Some(branch) = &branch {
      session.select_branch(branch)?;
    }
    if let Some(chapter) = &chapter {
      let pages = session.select_chapter(chapter)?;
      debug!("Chapter {chapter} covers {} pages", pages.len());
    }
    if let Some(page) = page {
      session.select_page(page_index(page)?)?;
    }
    interaction.reply(ResponseContent::Page(&session))?;
    (session.position(), session.content()?.text.clone())
  };

  if config.reader.learn_knowledge {
    let characters = book.characters.clone();
    let added = folio::knowledge::learn_from_page(&mut book, position, &text);
    // New traits of known characters count as learning too.
    if added > 0 || book.characters != characters {
      library.save(&book).await?;
    }
  }
  Ok(())
}

//! Module for rewriting pages of a book.

use super::*;

/// Arguments for [`Commands::Edit`]
#[derive(Args, Clone)]
pub struct EditArgs {
  /// Book id or title
  pub book: String,

  /// Page to replace, starting at 1
  #[arg(long)]
  pub page: usize,

  /// Text file with the new content of the page
  #[arg(long)]
  pub content: PathBuf,
}

/// Function for the [`Commands::Edit`] in the CLI.
///
/// The page keeps its place in the book, so chapters and branches are unaffected.
pub async fn edit<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  edit_args: EditArgs,
) -> Result<()> {
  let EditArgs { book, page, content } = edit_args;
  let (_, library) = open_library(config_path).await?;
  let mut book = library.get(&book).await?;

  let text = tokio::fs::read_to_string(&content).await?;
  book.replace_page(page_index(page)?, PageContent::from_text(text.trim()))?;
  library.save(&book).await?;
  interaction.reply(ResponseContent::Success(&format!("Replaced page {page} of {}", book.title)))
}

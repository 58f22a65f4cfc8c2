//! Module for showing the chapters and branches of a book.

use super::*;

/// Function for the [`Commands::Chapters`] in the CLI.
pub async fn chapters<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  book: &str,
) -> Result<()> {
  let (config, library) = open_library(config_path).await?;
  let book = library.get(book).await?;
  let preview_len = config.reader.preview_len;
  interaction.reply(ResponseContent::Chapters { book: &book, preview_len })
}

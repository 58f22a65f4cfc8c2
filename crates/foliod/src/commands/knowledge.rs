//! Module for showing what has been learned about a book.

use super::*;

/// Function for the [`Commands::Knowledge`] in the CLI.
pub async fn knowledge<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  book: &str,
) -> Result<()> {
  let (_, library) = open_library(config_path).await?;
  let book = library.get(book).await?;
  interaction.reply(ResponseContent::Knowledge(&book))
}

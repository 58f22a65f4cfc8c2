//! Module for removing books from the library.

use super::*;

/// Function for the [`Commands::Remove`] in the CLI.
pub async fn remove<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  book: &str,
) -> Result<()> {
  let (_, library) = open_library(config_path).await?;
  let stored = library.get(book).await?;
  interaction.reply(ResponseContent::Book(&stored))?;

  let question = format!("Remove {} from your library? This cannot be undone", stored.title);
  if !interaction.confirm(&question)? {
    interaction.reply(ResponseContent::Info("Kept the book"))?;
    return Ok(());
  }
  library.remove(&stored.id).await?;
  interaction.reply(ResponseContent::Success(&format!("Removed {}", stored.title)))
}

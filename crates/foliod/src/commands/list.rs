//! Module for listing the library.

use super::*;

/// Function for the [`Commands::List`] in the CLI.
pub async fn list<I: UserInteraction>(interaction: &I, config_path: &Path) -> Result<()> {
  let (_, library) = open_library(config_path).await?;
  let books = library.list().await?;
  interaction.reply(ResponseContent::Books(&books))
}

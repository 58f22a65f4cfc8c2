//! Module for importing files into the library.

use super::*;

/// Arguments for [`Commands::Import`]
#[derive(Args, Clone)]
pub struct ImportArgs {
  /// Files to import, as paths or glob patterns such as "novels/*.txt"
  #[arg(required = true)]
  pub patterns: Vec<String>,
}

/// Function for the [`Commands::Import`] in the CLI.
///
/// Files that fail to import are reported and skipped so one bad file does not stop the
/// rest. Returns the books that were added.
pub async fn import<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  import_args: ImportArgs,
) -> Result<Vec<Book>> {
  let (config, library) = open_library(config_path).await?;
  let mut added = Vec::new();

  for pattern in &import_args.patterns {
    let paths = glob::glob(pattern)?.collect::<core::result::Result<Vec<_>, _>>()?;
    if paths.is_empty() {
      interaction.reply(ResponseContent::Info(&format!("No files match {pattern}")))?;
      continue;
    }

    for path in paths {
      trace!("Importing {}", path.display());
      let book = match folio::import::import_file(&path, &config.extraction).await {
        Ok(book) => book,
        Err(e) => {
          interaction.reply(ResponseContent::Error(FoliodError::from(e)))?;
          continue;
        },
      };
      match library.add(&book).await {
        Ok(()) => {
          interaction.reply(ResponseContent::Book(&book))?;
          interaction.reply(ResponseContent::Success(&format!("Imported {}", path.display())))?;
          added.push(book);
        },
        Err(FolioError::DuplicateBook(title)) => interaction.reply(ResponseContent::Info(&format!(
          "{title} is already in your library, remove it first to import it again"
        )))?,
        Err(e) => return Err(e.into()),
      }
    }
  }
  Ok(added)
}

//! Module for setting up a [`folio`] configuration and library.

use super::*;

/// Options for [`Commands::Init`]
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Directory to keep the library in
  #[arg(long)]
  pub library_path: Option<PathBuf>,
}

/// Function for the [`Commands::Init`] in the CLI.
///
/// Writes the configuration to the `--config` path (or the default one) and creates the
/// library directory it names.
pub async fn init<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  init_options: InitOptions,
) -> Result<()> {
  let InitOptions { library_path } = init_options;

  if config_path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      config_path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info(
      "Keeping the existing configuration. Use --config to write one elsewhere",
    ))?;
    return Ok(());
  }

  let config = if let Some(library_path) = library_path {
    Config::default().with_library_path(&library_path)
  } else if !interaction.confirm(&format!(
    "Would you like to use the default path {} for storing the library?",
    Library::default_path().display(),
  ))? {
    interaction.reply(ResponseContent::Info(
      "Please pass in your intended library path using --library-path",
    ))?;
    return Ok(());
  } else {
    Config::default()
  };

  config.save(config_path)?;
  Library::open(&config.library_path).await?;
  interaction.reply(ResponseContent::Success(&format!(
    "Created folio configuration with\nConfig path: {}\nLibrary path: {}",
    config_path.display(),
    config.library_path.display(),
  )))?;
  Ok(())
}

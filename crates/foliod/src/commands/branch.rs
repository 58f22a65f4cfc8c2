//! Module for planning alternate story branches.

use super::*;

/// Arguments for [`Commands::Branch`]
#[derive(Args, Clone)]
pub struct BranchArgs {
  /// Book id or title
  pub book: String,

  /// Name of the branch
  #[arg(long)]
  pub name: String,

  /// Page the branch diverges at, starting at 1
  #[arg(long)]
  pub at: usize,

  /// Text file with the branch's pages, separated by blank lines
  #[arg(long)]
  pub content: PathBuf,

  /// Page of the main story the branch rejoins at, starting at 1
  #[arg(long)]
  pub reconnect: Option<usize>,

  /// What happens differently in this branch
  #[arg(long)]
  pub description: Option<String>,

  /// Identifier of the branch, derived from the name if not given
  #[arg(long)]
  pub id: Option<String>,
}

/// Function for the [`Commands::Branch`] in the CLI.
pub async fn branch<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  branch_args: BranchArgs,
) -> Result<()> {
  let BranchArgs { book, name, at, content, reconnect, description, id } = branch_args;
  let (_, library) = open_library(config_path).await?;
  let mut book = library.get(&book).await?;

  let text = tokio::fs::read_to_string(&content).await?;
  let pages = folio::import::split_text(&text);
  let id = id.unwrap_or_else(|| format::format_title(&name, None));

  let description = match description {
    Some(description) => Some(description),
    None => {
      let answer = interaction.prompt("Describe the branch (optional)")?;
      Some(answer).filter(|d| !d.trim().is_empty())
    },
  };

  let mut new_branch = Branch::new(id, name, page_index(at)?, pages);
  if let Some(description) = description {
    new_branch = new_branch.with_description(description);
  }
  if let Some(reconnect) = reconnect {
    new_branch = new_branch.with_reconnect(page_index(reconnect)?);
  }

  let summary = format!(
    "Added branch {} to {} at page {} with {} pages",
    new_branch.name,
    book.title,
    at,
    new_branch.content.len()
  );
  book.add_branch(new_branch)?;
  library.save(&book).await?;
  interaction.reply(ResponseContent::Success(&summary))
}

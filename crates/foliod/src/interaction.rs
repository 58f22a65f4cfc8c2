//! Prompts and formatted replies for the terminal.

use dialoguer::{Confirm, Input};
use folio::pagination::PaginationIndex;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for notices about branches
pub static BRANCH_PREFIX: &str = "⑂ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix for items in a list
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the last item in a list
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Separator between header fields
pub static BULLET: &str = "•";

/// Something the CLI reports back to the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// A single book, after import or change
  Book(&'a Book),
  /// Books in the library
  Books(&'a [Book]),
  /// Chapters and branches of a book, with page previews of `preview_len` characters
  Chapters {
    /// The book
    book:        &'a Book,
    /// Characters of page text to preview per chapter
    preview_len: usize,
  },
  /// Characters, settings, events and relationships learned about a book
  Knowledge(&'a Book),
  /// The current page of a reading session
  Page(&'a ReadingSession<'a>),
  /// A completed action
  Success(&'a str),
  /// A failed action that does not stop the command
  Error(FoliodError),
  /// Anything else worth telling
  Info(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for a line of free text, which may be empty.
  fn prompt(&self, message: &str) -> Result<String>;
  /// Shows `content` to the user.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .default(false)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(String::new());
    }
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .allow_empty(true)
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Book(book) => print_book(book),
      ResponseContent::Books(books) =>
        if books.is_empty() {
          println!("{} No books in the library yet", style(INFO_PREFIX).blue());
        } else {
          println!("{} {} books in the library", style(INFO_PREFIX).blue(), books.len());
          for (i, book) in books.iter().enumerate() {
            let prefix = if i + 1 == books.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
            println!(
              "{} {} {}",
              style(prefix).dim(),
              style(&book.title).white().bold(),
              style(format!("({})", book.id)).dim()
            );
            println!(
              "   {} pages {BULLET} {} chapters {BULLET} {} branches {BULLET} {}",
              book.page_count(),
              book.chapters.len(),
              book.branches.len(),
              book.author
            );
          }
        },
      ResponseContent::Chapters { book, preview_len } => print_chapters(book, preview_len)?,
      ResponseContent::Knowledge(book) => print_knowledge(book),
      ResponseContent::Page(session) => print_page(session)?,
      ResponseContent::Success(message) => println!("{} {message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Error(error) => eprintln!("{} {error}", style(ERROR_PREFIX).red()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).blue()),
    }
    Ok(())
  }
}

/// Summary of a single book.
fn print_book(book: &Book) {
  println!("{} {}", style("Title:").green().bold(), style(&book.title).white());
  println!("{} {}", style("Author:").green().bold(), book.author);
  println!("{} {}", style("Id:").green().bold(), style(&book.id).yellow());
  println!(
    "{} {} {BULLET} {} pages {BULLET} {} chapters",
    style("Format:").green().bold(),
    book.format,
    book.page_count(),
    book.chapters.len()
  );
}

/// Chapters with their 1-based page ranges, followed by the book's branches.
fn print_chapters(book: &Book, preview_len: usize) -> Result<()> {
  println!("{}", style(&book.title).white().bold());
  if book.chapters.is_empty() {
    println!("{} No chapters", style(INFO_PREFIX).blue());
  }
  let index = PaginationIndex::new(book);
  for (i, chapter) in book.chapters.iter().enumerate() {
    let (start, end) = index.page_range_of(chapter)?;
    let prefix = if i + 1 == book.chapters.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
    let pages = if start == end {
      format!("page {}", start + 1)
    } else {
      format!("pages {}-{}", start + 1, end + 1)
    };
    println!(
      "{} {} {} {}",
      style(prefix).dim(),
      style(&chapter.title).white(),
      style(format!("[{}]", chapter.id)).dim(),
      style(pages).cyan()
    );
    if let Some(page) = book.pages.get(start) {
      let preview = format::preview(&page.text, preview_len);
      if !preview.is_empty() {
        println!("   {}", style(preview).dim().italic());
      }
    }
  }

  for branch in &book.branches {
    let rejoins = branch
      .reconnect_page_index
      .map(|page| format!(", rejoins at page {}", page + 1))
      .unwrap_or_default();
    println!(
      "{} {} {} from page {} for {} pages{rejoins}",
      style(BRANCH_PREFIX).magenta(),
      style(&branch.name).white(),
      style(format!("[{}]", branch.id)).dim(),
      branch.branch_point_page_index + 1,
      branch.content.len()
    );
    if let Some(description) = &branch.description {
      println!("   {}", style(description).dim().italic());
    }
  }
  Ok(())
}

/// Everything learned about `book` while reading, with 1-based page numbers.
fn print_knowledge(book: &Book) {
  println!("{}", style(&book.title).white().bold());
  if book.characters.is_empty() && book.settings.is_empty() && book.events.is_empty() {
    println!("{} Nothing learned yet, read a few pages first", style(INFO_PREFIX).blue());
    return;
  }

  println!("{}", style("Characters").green().bold());
  for character in &book.characters {
    println!(
      "{} {} {} {}",
      style(BULLET).dim(),
      style(&character.name).white(),
      style(format!("(page {})", character.first_appearance + 1)).dim(),
      character.traits.join(", ")
    );
  }

  println!("{}", style("Settings").green().bold());
  for setting in &book.settings {
    println!(
      "{} {} {} {} events",
      style(BULLET).dim(),
      style(&setting.name).white(),
      style(format!("(page {})", setting.first_appearance + 1)).dim(),
      setting.events.len()
    );
  }

  println!("{}", style("Events").green().bold());
  for event in &book.events {
    println!("{} page {}: {}", style(BULLET).dim(), event.page_index + 1, event.title);
  }

  println!("{}", style("Relationships").green().bold());
  for relationship in &book.relationships {
    println!("{} {}", style(BULLET).dim(), relationship.description);
  }
}

/// The current page of `session` with its position, chapter and branch notices.
fn print_page(session: &ReadingSession) -> Result<()> {
  let book = session.book();
  let mut header = format!("Page {} of {}", session.position() + 1, session.total_pages());
  if let Some(position) = session.chapter() {
    header.push_str(&format!(" {BULLET} {}", position.chapter.title));
    if position.is_chapter_start {
      header.push_str(" (Start)");
    }
  }
  if let Timeline::Branch(branch) = session.timeline() {
    header.push_str(&format!(" {BULLET} branch {}", branch.name));
  }

  println!("{}", style(&book.title).white().bold());
  println!("{}", style(header).cyan());

  let here = session.branches_here();
  if !here.is_empty() {
    let names: Vec<_> = here.iter().map(|b| format!("{} [{}]", b.name, b.id)).collect();
    println!("{} Branch available: {}", style(BRANCH_PREFIX).magenta(), names.join(", "));
  }
  if let Some(page) = session.reconnect_notice() {
    println!(
      "{} This branch rejoins the story at page {}",
      style(BRANCH_PREFIX).magenta(),
      page + 1
    );
  }

  println!();
  println!("{}", session.content()?.text);
  Ok(())
}

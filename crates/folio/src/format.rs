//! Text, HTML and title formatting helpers.
//!
//! These are the small conversions shared by import, chapter extraction and the
//! reader front end: turning titles into filesystem-safe identifiers, wrapping
//! plain text into HTML pages and getting plain text back out of HTML.

use super::*;

lazy_static! {
  /// Any HTML tag.
  static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("valid tag regex");
  /// Closing tag of a heading element.
  static ref HEADING_CLOSE: Regex = Regex::new(r"(?i)</h[1-6]>").expect("valid heading regex");
  /// Runs of characters that are not safe in identifiers or filenames.
  static ref UNSAFE: Regex = Regex::new(r"[^a-z0-9]+").expect("valid slug regex");
}

/// Formats a title into a lowercase, hyphenated identifier.
///
/// Everything that is not an ASCII letter or digit collapses into a single `-`,
/// leading and trailing separators are dropped and the result is cut to
/// `max_length` characters (default 50) without leaving a trailing `-`.
///
/// # Examples
///
/// ```
/// use folio::format::format_title;
///
/// assert_eq!(format_title("Pride and Prejudice", None), "pride-and-prejudice");
/// assert_eq!(format_title("  Moby-Dick; or, The Whale ", Some(8)), "moby-dic");
/// ```
pub fn format_title(title: &str, max_length: Option<usize>) -> String {
  let max_length = max_length.unwrap_or(50);
  let lowered = title.to_lowercase();
  let slug = UNSAFE.replace_all(&lowered, "-");
  let slug: String = slug.trim_matches('-').chars().take(max_length).collect();
  let slug = slug.trim_end_matches('-');
  if slug.is_empty() {
    "untitled".to_string()
  } else {
    slug.to_string()
  }
}

/// Escapes the characters HTML gives meaning to.
pub fn escape_html(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#039;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

/// Converts a page of plain text into HTML, one `<p>` per non-empty line.
///
/// ```
/// use folio::format::text_to_html;
///
/// assert_eq!(text_to_html("Chapter 1\nIt is a <truth>."), "<p>Chapter 1</p><p>It is a &lt;truth&gt;.</p>");
/// assert_eq!(text_to_html(""), "<p></p>");
/// ```
pub fn text_to_html(text: &str) -> String {
  let paragraphs: Vec<String> = text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|line| format!("<p>{}</p>", escape_html(line)))
    .collect();
  if paragraphs.is_empty() {
    "<p></p>".to_string()
  } else {
    paragraphs.concat()
  }
}

/// Removes tags from an HTML fragment and decodes the common entities.
///
/// Block-level closing tags become line breaks so paragraphs survive as lines.
pub fn strip_tags(html: &str) -> String {
  let with_breaks = html
    .replace("</p>", "</p>\n")
    .replace("<br>", "\n")
    .replace("<br/>", "\n")
    .replace("<br />", "\n");
  let with_breaks = HEADING_CLOSE.replace_all(&with_breaks, "$0\n");
  let text = TAG.replace_all(&with_breaks, "");
  let text = text
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&#039;", "'")
    .replace("&nbsp;", " ")
    .replace("&amp;", "&");
  text.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>().join("\n")
}

/// Shortens text to at most `len` characters for list previews, adding `...` when cut.
pub fn preview(text: &str, len: usize) -> String {
  let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
  if flattened.chars().count() > len {
    let cut: String = flattened.chars().take(len).collect();
    format!("{cut}...")
  } else {
    flattened
  }
}

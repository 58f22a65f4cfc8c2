//! Story knowledge gathered while reading: characters, settings, events and the
//! relationships between characters.
//!
//! Knowledge is built in two steps:
//!
//! 1. [`extract_triplets`] scans the text of one page for simple
//!    `subject predicate object` statements such as "Alice went to the garden".
//! 2. [`update_knowledge`] merges those statements into a [`Book`]'s entity lists.
//!
//! Which list a statement feeds depends on its verb:
//!
//! - `is`, `was`, `has`, `had` describe a character and add to its traits
//! - `went`, `ran`, `jumped`, `moved`, `appeared` record an event, and a setting when the
//!   object names a place
//! - `said`, `spoke`, `saw` link two known characters
//!
//! Other recognized verbs yield triplets but do not change the book. Merging is
//! idempotent: feeding the same page twice adds nothing the second time.
//!
//! # Examples
//!
//! ```
//! use folio::{knowledge, prelude::*};
//!
//! let page = "Alice was curious. Alice went to the garden.";
//! let mut book = Book::new("Wonderland", "Anon", BookFormat::Txt, vec![PageContent::text(page)]);
//!
//! let triplets = knowledge::extract_triplets(0, page);
//! knowledge::update_knowledge(&mut book, &triplets);
//!
//! assert_eq!(book.characters[0].name, "Alice");
//! assert_eq!(book.settings[0].name, "the garden");
//! assert_eq!(book.events[0].title, "Alice went to the garden");
//! ```

use super::*;

lazy_static! {
  /// A capitalized name followed by one of the verbs statements are built from.
  static ref STATEMENT: Regex = Regex::new(
    r"\b([A-Z][a-z]+(?:\s[A-Z][a-z]+)*)\s+((?i:is|was|has|had|went|said|spoke|thought|felt|saw|heard|walked|ran|jumped|moved|looked|appeared|seemed|became|made))\b"
  )
  .expect("valid statement regex");
  /// Up to six words following the verb.
  static ref OBJECT: Regex =
    Regex::new(r"[A-Za-z]+(?:\s[A-Za-z]+){0,5}").expect("valid object regex");
}

/// Capitalized words that open sentences without naming anyone.
const NOT_NAMES: &[&str] = &[
  "a", "an", "and", "but", "he", "her", "his", "i", "it", "its", "our", "she", "that", "the",
  "their", "then", "there", "they", "this", "we", "what", "when", "where", "you",
];

/// Words that mark an object as a place.
const PLACE_WORDS: &[&str] = &[
  "house", "room", "garden", "park", "street", "city", "town", "village", "castle", "palace",
  "forest", "mountain", "river", "lake", "ocean", "sea", "school", "university", "hospital",
  "restaurant", "cafe", "shop", "store",
];

/// Prepositions dropped from the front of a place name.
const PREPOSITIONS: &[&str] = &[
  "across", "at", "down", "from", "in", "into", "over", "through", "to", "toward", "towards",
  "up",
];

/// Verbs describing a character.
const TRAIT_VERBS: &[&str] = &["is", "was", "has", "had"];
/// Verbs recording something that happens.
const EVENT_VERBS: &[&str] = &["went", "ran", "jumped", "moved", "appeared"];
/// Verbs linking two characters.
const RELATION_VERBS: &[&str] = &["spoke", "said", "saw"];

/// Confidence attached to every pattern-matched statement.
pub const STATEMENT_CONFIDENCE: f32 = 0.7;

/// A `subject predicate object` statement found on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Triplet {
  /// Who or what the statement is about
  pub subject:           String,
  /// The verb, lowercased
  pub predicate:         String,
  /// Up to six words following the verb
  pub object:            String,
  /// How much the statement can be trusted, between 0 and 1
  pub confidence:        f32,
  /// Page the statement was found on
  pub source_page_index: usize,
}

/// A character of the story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
  /// Identifier, derived from the name
  pub id:               String,
  /// Name as first seen
  pub name:             String,
  /// First statement made about the character
  #[serde(default)]
  pub description:      String,
  /// Everything the character is or has, without duplicates
  #[serde(default)]
  pub traits:           Vec<String>,
  /// Page the character first appeared on
  pub first_appearance: usize,
  /// Ids of the relationships the character is part of
  #[serde(default)]
  pub relationships:    Vec<String>,
}

/// How much an event matters to the story.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
  /// Background detail
  #[default]
  Minor,
  /// Moves the plot along
  Major,
  /// Changes the course of the story
  Pivotal,
}

/// Something that happens in the story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
  /// Identifier, numbered in order of discovery
  pub id:          String,
  /// The statement the event was found in, unique within a book
  pub title:       String,
  /// Longer account of the event
  #[serde(default)]
  pub description: String,
  /// Page the event happens on
  pub page_index:  usize,
  /// Ids of the characters involved
  #[serde(default)]
  pub characters:  Vec<String>,
  /// Id of the setting the event happens in
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub setting:     Option<String>,
  /// How much the event matters
  #[serde(default)]
  pub importance:  Importance,
}

/// A place in the story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Setting {
  /// Identifier, derived from the name
  pub id:               String,
  /// Name as first seen
  pub name:             String,
  /// How the place was first mentioned
  #[serde(default)]
  pub description:      String,
  /// Page the place first appeared on
  pub first_appearance: usize,
  /// Ids of the events happening here
  #[serde(default)]
  pub events:           Vec<String>,
}

/// The kind of bond between characters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
  /// Relatives
  Family,
  /// Friends
  Friend,
  /// Opponents
  Enemy,
  /// Lovers
  Romantic,
  /// Colleagues
  Professional,
  /// Not yet known
  #[default]
  Other,
}

/// A bond between characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relationship {
  /// Identifier, numbered in order of discovery
  pub id:              String,
  /// Kind of bond
  #[serde(rename = "type", default)]
  pub kind:            RelationshipKind,
  /// The statement the relationship was found in
  #[serde(default)]
  pub description:     String,
  /// Ids of the characters involved, usually two
  pub characters:      Vec<String>,
  /// Page the relationship was first mentioned on
  pub first_mentioned: usize,
}

/// Finds `subject predicate object` statements in the text of a page.
///
/// Subjects are runs of capitalized words directly before a known verb. Leading words
/// that cannot be names ("The", "Then", "She") are dropped, and statements left
/// without a subject are skipped. The object is the first run of up to six words after
/// the verb within the same sentence.
pub fn extract_triplets(page_index: usize, text: &str) -> Vec<Triplet> {
  let mut triplets = Vec::new();
  for captures in STATEMENT.captures_iter(text) {
    let (Some(whole), Some(subject), Some(predicate)) =
      (captures.get(0), captures.get(1), captures.get(2))
    else {
      continue;
    };
    let Some(subject) = trim_subject(subject.as_str()) else {
      continue;
    };
    let rest = &text[whole.end()..];
    let sentence = rest.split(['.', '!', '?', ';', '\n']).next().unwrap_or_default();
    let Some(object) = OBJECT.find(sentence) else {
      continue;
    };
    triplets.push(Triplet {
      subject,
      predicate: predicate.as_str().to_lowercase(),
      object: object.as_str().to_string(),
      confidence: STATEMENT_CONFIDENCE,
      source_page_index: page_index,
    });
  }
  trace!("Found {} statements on page {page_index}", triplets.len());
  triplets
}

/// Merges `triplets` into the characters, events, settings and relationships of
/// `book`, returning how many new entities were added.
///
/// Characters and settings are matched by name ignoring case, events by title and
/// relationships by the pair of characters they join. Known characters gain the
/// objects of later descriptions as traits.
pub fn update_knowledge(book: &mut Book, triplets: &[Triplet]) -> usize {
  let before = entity_count(book);
  for triplet in triplets {
    let predicate = triplet.predicate.as_str();
    if TRAIT_VERBS.contains(&predicate) {
      describe_character(book, triplet);
    }
    if EVENT_VERBS.contains(&predicate) {
      record_event(book, triplet);
    }
    if RELATION_VERBS.contains(&predicate) {
      relate_characters(book, triplet);
    }
  }
  let added = entity_count(book) - before;
  if added > 0 {
    debug!("Learned {added} new entities about {}", book.id);
  }
  added
}

/// Extracts statements from `text`, shown at `page_index`, and merges them into
/// `book`. Returns how many new entities were added.
pub fn learn_from_page(book: &mut Book, page_index: usize, text: &str) -> usize {
  let triplets = extract_triplets(page_index, text);
  update_knowledge(book, &triplets)
}

/// Whether `name` could be a character's name.
pub fn is_likely_character(name: &str) -> bool {
  name.chars().next().is_some_and(char::is_uppercase) && name.chars().count() > 1
}

/// Whether `name` mentions a kind of place.
pub fn is_likely_setting(name: &str) -> bool {
  let name = name.to_lowercase();
  PLACE_WORDS.iter().any(|word| name.contains(word))
}

/// The place an object names, without the preposition leading to it.
fn place_name(object: &str) -> &str {
  match object.split_once(' ') {
    Some((first, rest)) if PREPOSITIONS.contains(&first.to_lowercase().as_str()) => rest,
    _ => object,
  }
}

/// Drops leading words that cannot be names, `None` if nothing remains.
fn trim_subject(subject: &str) -> Option<String> {
  let words: Vec<&str> = subject.split_whitespace().collect();
  let first_name =
    words.iter().position(|word| !NOT_NAMES.contains(&word.to_lowercase().as_str()))?;
  Some(words[first_name..].join(" "))
}

/// Total number of entities known about `book`.
fn entity_count(book: &Book) -> usize {
  book.characters.len() + book.events.len() + book.settings.len() + book.relationships.len()
}

/// Position of the character called `name`, ignoring case.
fn find_character(book: &Book, name: &str) -> Option<usize> {
  book.characters.iter().position(|c| c.name.eq_ignore_ascii_case(name))
}

/// The statement a triplet was made from.
fn statement(triplet: &Triplet) -> String {
  format!("{} {} {}", triplet.subject, triplet.predicate, triplet.object)
}

/// Adds a character or a trait of a known one.
fn describe_character(book: &mut Book, triplet: &Triplet) {
  match find_character(book, &triplet.subject) {
    Some(position) => {
      let character = &mut book.characters[position];
      if !character.traits.contains(&triplet.object) {
        character.traits.push(triplet.object.clone());
      }
      if character.description.is_empty() {
        character.description = statement(triplet);
      }
    },
    None if is_likely_character(&triplet.subject) => {
      trace!("New character {}", triplet.subject);
      book.characters.push(Character {
        id:               format!("character-{}", format::format_title(&triplet.subject, None)),
        name:             triplet.subject.clone(),
        description:      statement(triplet),
        traits:           vec![triplet.object.clone()],
        first_appearance: triplet.source_page_index,
        relationships:    Vec::new(),
      });
    },
    None => {},
  }
}

/// Records an event, creating its setting when the object names a new place.
fn record_event(book: &mut Book, triplet: &Triplet) {
  let title = statement(triplet);
  if book.events.iter().any(|e| e.title == title) {
    return;
  }

  let characters = find_character(book, &triplet.subject)
    .map(|position| vec![book.characters[position].id.clone()])
    .unwrap_or_default();

  let place = place_name(&triplet.object);
  let existing = book.settings.iter().position(|s| s.name.eq_ignore_ascii_case(place));
  let setting = match existing {
    Some(position) => Some(position),
    None if is_likely_setting(place) => {
      book.settings.push(Setting {
        id:               format!("setting-{}", format::format_title(place, None)),
        name:             place.to_string(),
        description:      format!("Where {} {}", triplet.subject, triplet.predicate),
        first_appearance: triplet.source_page_index,
        events:           Vec::new(),
      });
      Some(book.settings.len() - 1)
    },
    None => None,
  };

  let id = format!("event-{}", book.events.len() + 1);
  if let Some(position) = setting {
    book.settings[position].events.push(id.clone());
  }
  book.events.push(Event {
    id,
    description: title.clone(),
    title,
    page_index: triplet.source_page_index,
    characters,
    setting: setting.map(|position| book.settings[position].id.clone()),
    importance: Importance::Minor,
  });
}

/// Links the subject to the character the object starts with, if both are known.
fn relate_characters(book: &mut Book, triplet: &Triplet) {
  let Some(first) = find_character(book, &triplet.subject) else {
    return;
  };
  let object = triplet.object.to_lowercase();
  let Some(second) = book.characters.iter().position(|c| {
    let name = c.name.to_lowercase();
    object == name || object.starts_with(&format!("{name} "))
  }) else {
    return;
  };
  if first == second {
    return;
  }

  let first_id = book.characters[first].id.clone();
  let second_id = book.characters[second].id.clone();
  let known = book
    .relationships
    .iter()
    .any(|r| r.characters.contains(&first_id) && r.characters.contains(&second_id));
  if known {
    return;
  }

  let id = format!("relationship-{}", book.relationships.len() + 1);
  let description = format!(
    "{} {} {}",
    book.characters[first].name, triplet.predicate, book.characters[second].name
  );
  book.characters[first].relationships.push(id.clone());
  book.characters[second].relationships.push(id.clone());
  book.relationships.push(Relationship {
    id,
    kind: RelationshipKind::Other,
    description,
    characters: vec![first_id, second_id],
    first_mentioned: triplet.source_page_index,
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  fn book() -> Book {
    Book::new("Wonderland", "Carroll", BookFormat::Txt, vec![PageContent::text("")])
  }

  fn triplet(subject: &str, predicate: &str, object: &str) -> Triplet {
    Triplet {
      subject:           subject.into(),
      predicate:         predicate.into(),
      object:            object.into(),
      confidence:        STATEMENT_CONFIDENCE,
      source_page_index: 0,
    }
  }

  #[test]
  fn test_extract_statements() {
    let triplets = extract_triplets(3, "Then Alice went to the garden. The Queen was furious!");
    assert_eq!(triplets.len(), 2);
    assert_eq!(triplets[0].subject, "Alice");
    assert_eq!(triplets[0].predicate, "went");
    assert_eq!(triplets[0].object, "to the garden");
    assert_eq!(triplets[0].source_page_index, 3);
    assert_eq!(triplets[1].subject, "Queen");
    assert_eq!(triplets[1].object, "furious");
  }

  #[test]
  fn test_pronouns_are_not_subjects() {
    assert!(extract_triplets(0, "It was a dark and stormy night.").is_empty());
    assert!(extract_triplets(0, "She said nothing. They went away.").is_empty());
  }

  #[test]
  fn test_object_stays_in_its_sentence() {
    assert!(extract_triplets(0, "Alice was. Nothing else").is_empty());
    let triplets = extract_triplets(0, "Bob Smith had one two three four five six seven eight");
    assert_eq!(triplets[0].subject, "Bob Smith");
    assert_eq!(triplets[0].object, "one two three four five six");
  }

  #[test]
  fn test_verbs_ignore_case() {
    let triplets = extract_triplets(0, "Alice WAS late");
    assert_eq!(triplets[0].predicate, "was");
  }

  #[test]
  fn test_characters_merge_traits() {
    let mut book = book();
    let page = "Alice was curious. Alice had a cat. Alice was curious.";
    assert_eq!(learn_from_page(&mut book, 0, page), 1);
    assert_eq!(update_knowledge(&mut book, &[triplet("ALICE", "has", "a hat")]), 0);

    assert_eq!(book.characters.len(), 1);
    let alice = &book.characters[0];
    assert_eq!(alice.id, "character-alice");
    assert_eq!(alice.description, "Alice was curious");
    assert_eq!(alice.traits, vec!["curious", "a cat", "a hat"]);
  }

  #[test]
  fn test_lowercase_subjects_are_not_characters() {
    let mut book = book();
    assert_eq!(update_knowledge(&mut book, &[triplet("someone", "was", "here")]), 0);
    assert!(!is_likely_character("A"));
    assert!(is_likely_character("Al"));
  }

  #[test]
  fn test_events_and_settings() {
    let mut book = book();
    learn_from_page(&mut book, 0, "Alice was small.");
    learn_from_page(&mut book, 2, "Alice went to the castle. Alice ran quickly home.");

    assert_eq!(book.events.len(), 2);
    assert_eq!(book.settings.len(), 1);
    let castle = &book.settings[0];
    assert_eq!(castle.name, "the castle");
    assert_eq!(castle.id, "setting-the-castle");
    assert_eq!(castle.events, vec!["event-1"]);
    assert_eq!(castle.first_appearance, 2);

    let visit = &book.events[0];
    assert_eq!(visit.characters, vec!["character-alice"]);
    assert_eq!(visit.setting.as_deref(), Some("setting-the-castle"));
    assert_eq!(visit.title, "Alice went to the castle");
    assert_eq!(visit.importance, Importance::Minor);
    assert_eq!(book.events[1].setting, None);
  }

  #[test]
  fn test_learning_twice_adds_nothing() {
    let mut book = book();
    let page = "Alice was tall. Bob was short. Alice saw Bob. Bob went to the garden.";
    let first = learn_from_page(&mut book, 0, page);
    assert_eq!(first, 5);
    let snapshot = book.clone();
    assert_eq!(learn_from_page(&mut book, 0, page), 0);
    assert_eq!(book, snapshot);
  }

  #[test]
  fn test_relationships() {
    let mut book = book();
    learn_from_page(&mut book, 0, "Alice was tall. Bob was short.");
    let page = "Alice saw Bob in the park. Bob said Alice was right. Alice saw Alice";
    learn_from_page(&mut book, 4, page);

    assert_eq!(book.relationships.len(), 1);
    let relationship = &book.relationships[0];
    assert_eq!(relationship.description, "Alice saw Bob");
    assert_eq!(relationship.characters, vec!["character-alice", "character-bob"]);
    assert_eq!(relationship.first_mentioned, 4);
    assert_eq!(relationship.kind, RelationshipKind::Other);
    assert_eq!(book.characters[0].relationships, vec!["relationship-1"]);
    assert_eq!(book.characters[1].relationships, vec!["relationship-1"]);
  }

  #[test]
  fn test_unknown_characters_are_not_related() {
    let mut book = book();
    learn_from_page(&mut book, 0, "Alice saw Bob.");
    assert!(book.relationships.is_empty());
    assert!(book.characters.is_empty());
  }

  #[test]
  fn test_relationship_serializes_kind_as_type() {
    let relationship = Relationship {
      id:              "relationship-1".into(),
      kind:            RelationshipKind::Friend,
      description:     String::new(),
      characters:      vec![],
      first_mentioned: 0,
    };
    let json = serde_json::to_string(&relationship).unwrap();
    assert!(json.contains(r#""type":"friend""#));
  }
}

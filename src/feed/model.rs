//! Feed data types
//!
//! - `Entry`: a journal/photo post as stored by the backend
//! - `Comment` / `NewComment`: visitor comments and the row we write
//! - `Reaction` / `NewReaction`: append-only emoji rows
//! - `ReactionTally`: per-emoji counts derived from reaction rows
//! - `FeedEntry`: an entry with its comments and tallies merged on

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// The reaction buttons shown under every entry, in display order
pub const REACTION_EMOJIS: [&str; 4] = ["🐷", "🤣", "🤦‍♀️", "💩"];

/// Backend row identifier
///
/// The service may hand out numeric or UUID keys; both are kept as text
/// so they can round-trip through data attributes and filters unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(RecordId(s)),
            Value::Number(n) => Ok(RecordId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, got {}",
                other
            ))),
        }
    }
}

/// A journal/photo post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    /// Markdown text
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Hand-written date shown instead of the timestamp
    #[serde(default)]
    pub date_label: Option<String>,
    #[serde(default, deserialize_with = "image_list")]
    pub images: Vec<String>,
}

impl Entry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            title: None,
            body: None,
            author: None,
            mood: None,
            created_at: None,
            date_label: None,
            images: Vec::new(),
        }
    }

    /// Builder method: set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method: set body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builder method: set creation time
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builder method: add an image reference
    pub fn image(mut self, src: impl Into<String>) -> Self {
        self.images.push(src.into());
        self
    }
}

/// A visitor comment as stored by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub entry_id: RecordId,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The row written when a visitor posts a comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub entry_id: RecordId,
    pub author: String,
    pub body: String,
}

impl NewComment {
    /// The comment as it will appear once stored, before the backend
    /// has assigned an id or timestamp
    pub fn to_comment(&self) -> Comment {
        Comment {
            id: None,
            entry_id: self.entry_id.clone(),
            author: Some(self.author.clone()),
            body: self.body.clone(),
            created_at: None,
        }
    }
}

/// A reaction row (only the columns the feed reads)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reaction {
    pub entry_id: RecordId,
    pub emoji: String,
}

/// The row written when a visitor taps a reaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReaction {
    pub entry_id: RecordId,
    pub emoji: String,
}

/// Reaction counts for one entry, keyed by emoji
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionTally {
    counts: BTreeMap<String, u32>,
}

impl ReactionTally {
    /// Count for one emoji (zero when never tapped)
    pub fn count(&self, emoji: &str) -> u32 {
        self.counts.get(emoji).copied().unwrap_or(0)
    }

    /// Add one reaction and return the new count
    pub fn increment(&mut self, emoji: &str) -> u32 {
        let count = self.counts.entry(emoji.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

/// An entry with its comments and reaction counts merged on
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub entry: Entry,
    /// Oldest first
    pub comments: Vec<Comment>,
    pub reactions: ReactionTally,
}

impl FeedEntry {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            comments: Vec::new(),
            reactions: ReactionTally::default(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.entry.id
    }
}

/// Chronological order with undated rows last
pub fn chronological(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Newest first with undated rows last
pub fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        _ => chronological(a, b),
    }
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_timestamp))
}

/// RFC 3339, or a zone-less `timestamp` column read as UTC
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
}

fn image_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

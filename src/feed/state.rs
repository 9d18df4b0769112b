//! In-memory feed cache
//!
//! Rebuilt wholesale by every full load and patched after successful
//! writes. Lives only as long as the page view.

use super::model::{Comment, FeedEntry, RecordId};

/// The entries currently on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    entries: Vec<FeedEntry>,
}

impl FeedState {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn find(&self, id: &RecordId) -> Option<&FeedEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    fn find_mut(&mut self, id: &RecordId) -> Option<&mut FeedEntry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    /// Append a stored comment to its entry; false when the entry is unknown
    pub fn append_comment(&mut self, comment: Comment) -> bool {
        match self.find_mut(&comment.entry_id) {
            Some(entry) => {
                entry.comments.push(comment);
                true
            }
            None => false,
        }
    }

    /// Count one more reaction; returns the new count, or `None` when the
    /// entry is unknown
    pub fn record_reaction(&mut self, entry_id: &RecordId, emoji: &str) -> Option<u32> {
        self.find_mut(entry_id)
            .map(|entry| entry.reactions.increment(emoji))
    }

    /// Current count for one (entry, emoji) pair
    pub fn reaction_count(&self, entry_id: &RecordId, emoji: &str) -> u32 {
        self.find(entry_id)
            .map(|entry| entry.reactions.count(emoji))
            .unwrap_or(0)
    }
}

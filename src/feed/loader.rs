//! Feed loader
//!
//! Fetches entries, then comments and reaction rows for those entries
//! concurrently, and merges everything into [`FeedEntry`] values.

use futures_util::future::join;
use std::collections::HashMap;

use super::model::{chronological, newest_first, Comment, Entry, FeedEntry, Reaction, RecordId};
use super::store;
use crate::backend::{Backend, BackendResult};

/// Load the whole feed
///
/// Fails with the entries error if that request fails. Otherwise the
/// comments and reactions requests run side by side, and the first error
/// among them (comments before reactions) is returned.
pub async fn load_feed<B: Backend + ?Sized>(backend: &B) -> BackendResult<Vec<FeedEntry>> {
    let entries = store::fetch_entries(backend).await?;
    if entries.is_empty() {
        tracing::info!("Feed is empty");
        return Ok(Vec::new());
    }

    let ids: Vec<RecordId> = entries.iter().map(|e| e.id.clone()).collect();
    let (comments, reactions) = join(
        store::fetch_comments(backend, &ids),
        store::fetch_reactions(backend, &ids),
    )
    .await;
    let comments = comments?;
    let reactions = reactions?;

    tracing::info!(
        entries = entries.len(),
        comments = comments.len(),
        reactions = reactions.len(),
        "Feed loaded"
    );

    Ok(merge(entries, comments, reactions))
}

/// Group comments and reactions onto their entries
///
/// Entries come out newest first and comments oldest first, whatever
/// order the rows arrived in. Rows for unknown entries are dropped.
pub fn merge(
    mut entries: Vec<Entry>,
    comments: Vec<Comment>,
    reactions: Vec<Reaction>,
) -> Vec<FeedEntry> {
    entries.sort_by(|a, b| newest_first(&a.created_at, &b.created_at));

    let mut feed: Vec<FeedEntry> = entries.into_iter().map(FeedEntry::new).collect();
    let index: HashMap<RecordId, usize> = feed
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id().clone(), i))
        .collect();

    for comment in comments {
        if let Some(&i) = index.get(&comment.entry_id) {
            feed[i].comments.push(comment);
        }
    }
    for item in &mut feed {
        item.comments
            .sort_by(|a, b| chronological(&a.created_at, &b.created_at));
    }

    for reaction in reactions {
        if let Some(&i) = index.get(&reaction.entry_id) {
            feed[i].reactions.increment(&reaction.emoji);
        }
    }

    feed
}

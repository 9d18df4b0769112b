//! Typed table access
//!
//! Turns [`Backend`] JSON rows into feed types. Every query the page issues
//! is spelled out here.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::model::{Comment, Entry, NewComment, NewReaction, Reaction, RecordId};
use crate::backend::{Backend, BackendError, BackendResult, Direction, Insert, Query, Table};

/// All entries, newest first
pub async fn fetch_entries<B: Backend + ?Sized>(backend: &B) -> BackendResult<Vec<Entry>> {
    let query = Query::from(Table::Entries)
        .select("*")
        .order("created_at", Direction::Descending);
    decode_rows(backend.select(&query).await?)
}

/// Comments on the given entries, oldest first
pub async fn fetch_comments<B: Backend + ?Sized>(
    backend: &B,
    entry_ids: &[RecordId],
) -> BackendResult<Vec<Comment>> {
    let query = Query::from(Table::Comments)
        .select("*")
        .in_list("entry_id", entry_ids.iter().map(RecordId::as_str))
        .order("created_at", Direction::Ascending);
    decode_rows(backend.select(&query).await?)
}

/// Raw reaction rows for the given entries
pub async fn fetch_reactions<B: Backend + ?Sized>(
    backend: &B,
    entry_ids: &[RecordId],
) -> BackendResult<Vec<Reaction>> {
    let query = Query::from(Table::Reactions)
        .select("entry_id, emoji")
        .in_list("entry_id", entry_ids.iter().map(RecordId::as_str));
    decode_rows(backend.select(&query).await?)
}

/// Write a comment and return the stored row
///
/// When the service sends nothing back, the written payload stands in for it.
pub async fn insert_comment<B: Backend + ?Sized>(
    backend: &B,
    comment: &NewComment,
) -> BackendResult<Comment> {
    let insert = Insert::row(Table::Comments, comment)?.returning();
    let stored: Vec<Comment> = decode_rows(backend.insert(&insert).await?)?;
    Ok(stored
        .into_iter()
        .next()
        .unwrap_or_else(|| comment.to_comment()))
}

/// Append one reaction row
pub async fn insert_reaction<B: Backend + ?Sized>(
    backend: &B,
    reaction: &NewReaction,
) -> BackendResult<()> {
    let insert = Insert::row(Table::Reactions, reaction)?;
    backend.insert(&insert).await?;
    Ok(())
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> BackendResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(BackendError::from))
        .collect()
}

//! Comment submission state machine
//!
//! `Idle` → (form submit with text) → `IdentityPending` → (persona chosen)
//! → `Submitted` → back to `Idle` on success, or to `IdentityPending` on
//! failure. Dismissing the chooser returns to `Idle` from anywhere.

use crate::feed::RecordId;

/// The comment waiting for a persona
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    /// Entry the comment belongs to; also identifies the originating input
    pub entry_id: RecordId,
    /// Trimmed text
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommentFlow {
    #[default]
    Idle,
    IdentityPending(PendingComment),
    Submitted(PendingComment),
}

impl CommentFlow {
    pub fn is_idle(&self) -> bool {
        matches!(self, CommentFlow::Idle)
    }

    /// Form submitted; returns true when the persona prompt should open
    ///
    /// Blank text (after trimming) changes nothing. A new submission
    /// replaces any comment already waiting.
    pub fn submit(&mut self, entry_id: RecordId, raw_text: &str) -> bool {
        let text = raw_text.trim();
        if text.is_empty() {
            return false;
        }
        *self = CommentFlow::IdentityPending(PendingComment {
            entry_id,
            text: text.to_string(),
        });
        true
    }

    /// Persona chosen; returns the comment to write, or `None` when there
    /// is nothing waiting for a persona
    pub fn choose(&mut self) -> Option<PendingComment> {
        match std::mem::take(self) {
            CommentFlow::IdentityPending(pending) => {
                *self = CommentFlow::Submitted(pending.clone());
                Some(pending)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// A write finished; returns whether it still owned the flow
    ///
    /// Only the write that moved the flow to `Submitted` may move it on.
    /// A write that was dismissed or superseded leaves the flow alone.
    pub fn finish(&mut self, written: &PendingComment, ok: bool) -> bool {
        let owns = matches!(self, CommentFlow::Submitted(p) if p == written);
        if owns {
            *self = if ok {
                CommentFlow::Idle
            } else {
                CommentFlow::IdentityPending(written.clone())
            };
        }
        owns
    }

    /// Chooser dismissed
    pub fn cancel(&mut self) {
        *self = CommentFlow::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(text: &str) -> PendingComment {
        PendingComment {
            entry_id: RecordId::new("E"),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_blank_submit_stays_idle() {
        let mut flow = CommentFlow::default();
        assert!(!flow.submit(RecordId::new("E"), "   \n\t"));
        assert!(flow.is_idle());
    }

    #[test]
    fn test_submit_trims_and_waits() {
        let mut flow = CommentFlow::default();
        assert!(flow.submit(RecordId::new("E"), "  Hi  "));
        assert_eq!(flow, CommentFlow::IdentityPending(pending("Hi")));
    }

    #[test]
    fn test_success_returns_to_idle() {
        let mut flow = CommentFlow::default();
        flow.submit(RecordId::new("E"), "Hi");

        let written = flow.choose().unwrap();
        assert_eq!(flow, CommentFlow::Submitted(pending("Hi")));
        assert!(flow.choose().is_none());

        assert!(flow.finish(&written, true));
        assert!(flow.is_idle());
    }

    #[test]
    fn test_failure_reopens_prompt() {
        let mut flow = CommentFlow::default();
        flow.submit(RecordId::new("E"), "Hi");
        let written = flow.choose().unwrap();

        assert!(flow.finish(&written, false));
        assert_eq!(flow, CommentFlow::IdentityPending(pending("Hi")));
        assert!(flow.choose().is_some());
    }

    #[test]
    fn test_cancel_discards() {
        let mut flow = CommentFlow::default();
        flow.submit(RecordId::new("E"), "Hi");
        flow.cancel();
        assert!(flow.is_idle());
        assert!(flow.choose().is_none());
    }

    #[test]
    fn test_dismissed_write_does_not_touch_new_comment() {
        let mut flow = CommentFlow::default();
        flow.submit(RecordId::new("E"), "alt");
        let written = flow.choose().unwrap();

        flow.cancel();
        flow.submit(RecordId::new("E"), "neu");

        assert!(!flow.finish(&written, false));
        assert_eq!(flow, CommentFlow::IdentityPending(pending("neu")));
    }
}

//! Feed controller
//!
//! [`FeedApp`] ties the backend, the page and the in-memory state together.
//! Each visitor action is one method; the async ones are spawned by the UI
//! and may fail independently of each other.

use std::cell::{Ref, RefCell};
use tracing::{debug, error, info, warn};

use super::comment::CommentFlow;
use super::error::WriteError;
use super::lightbox::{Lightbox, LightboxPhase, Settled};
use super::page::Page;
use crate::backend::{Backend, BackendResult};
use crate::config::{ConfigError, SiteConfig};
use crate::feed::store::{insert_comment, insert_reaction};
use crate::feed::{load_feed, FeedState, NewComment, NewReaction, Persona, RecordId};
use crate::view::{
    count_label, render_config_missing, render_feed, render_identity_choices, render_load_error,
    render_loading,
};

/// The running feed page
///
/// State lives in `RefCell`s and no borrow is held across an `.await`, so
/// handlers spawned from different events can interleave safely.
pub struct FeedApp<B, P> {
    backend: B,
    page: P,
    feed: RefCell<FeedState>,
    comment: RefCell<CommentFlow>,
    lightbox: RefCell<Lightbox>,
}

impl<B: Backend, P: Page> FeedApp<B, P> {
    /// Prepare the page and check the backend settings
    ///
    /// On a configuration problem the warning and the "service unavailable"
    /// card are shown and `connect` is never called. Call [`FeedApp::reload`]
    /// afterwards to fetch the feed.
    pub fn start<F>(config: &SiteConfig, page: P, connect: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&SiteConfig) -> B,
    {
        page.set_identity_choices(&render_identity_choices());
        page.refresh_icons();

        if let Err(e) = config.validate() {
            warn!(error = %e, "Backend not configured, feed disabled");
            page.show_config_warning();
            page.set_feed_markup(&render_config_missing());
            page.refresh_icons();
            return Err(e);
        }

        info!("Feed page started");
        Ok(Self {
            backend: connect(config),
            page,
            feed: RefCell::default(),
            comment: RefCell::default(),
            lightbox: RefCell::default(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Entries currently cached
    pub fn feed(&self) -> Ref<'_, FeedState> {
        self.feed.borrow()
    }

    pub fn comment_flow(&self) -> CommentFlow {
        self.comment.borrow().clone()
    }

    pub fn lightbox_phase(&self) -> LightboxPhase {
        self.lightbox.borrow().phase().clone()
    }

    /// Fetch the whole feed and re-render it
    ///
    /// A read failure replaces the feed with an inline error message.
    pub async fn reload(&self, show_loader: bool) -> BackendResult<()> {
        if show_loader {
            self.page.set_feed_markup(&render_loading());
            self.page.refresh_icons();
        }

        match load_feed(&self.backend).await {
            Ok(entries) => {
                *self.feed.borrow_mut() = FeedState::new(entries);
                self.render();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load feed");
                self.page.set_feed_markup(&render_load_error(&e.user_message()));
                Err(e)
            }
        }
    }

    /// Comment form submitted; returns whether the persona prompt opened
    pub fn submit_comment(&self, entry_id: RecordId, text: &str) -> bool {
        let opened = self.comment.borrow_mut().submit(entry_id, text);
        if opened {
            debug!("Comment waiting for a persona");
            self.page.open_identity_modal();
        }
        opened
    }

    /// Persona chosen in the prompt: write the waiting comment
    pub async fn choose_persona(&self, persona: Persona) -> Result<(), WriteError> {
        let next = self.comment.borrow_mut().choose();
        let Some(pending) = next else {
            debug!(persona = %persona, "No comment waiting, choice ignored");
            return Ok(());
        };

        let new_comment = NewComment {
            entry_id: pending.entry_id.clone(),
            author: persona.name().to_string(),
            body: pending.text.clone(),
        };
        let result = insert_comment(&self.backend, &new_comment).await;
        let owns_flow = self.comment.borrow_mut().finish(&pending, result.is_ok());

        match result {
            Ok(stored) => {
                let appended = self.feed.borrow_mut().append_comment(stored);
                if !appended {
                    warn!(entry = %pending.entry_id, "Comment stored for an entry that is not loaded");
                }
                self.render();
                self.page.clear_comment_input(&pending.entry_id);
                if owns_flow {
                    self.page.close_identity_modal();
                }
                debug!(entry = %pending.entry_id, author = %persona, "Comment saved");
                Ok(())
            }
            Err(e) => {
                warn!(entry = %pending.entry_id, error = %e, "Failed to save comment");
                let err = WriteError::Comment(e);
                self.page.alert(&err.to_string());
                Err(err)
            }
        }
    }

    /// Persona prompt dismissed
    pub fn cancel_comment(&self) {
        self.comment.borrow_mut().cancel();
        self.page.close_identity_modal();
    }

    /// Reaction tapped: append one row and bump the visible counter
    ///
    /// Returns the new count, or `None` when the entry is not cached.
    pub async fn react(&self, entry_id: RecordId, emoji: &str) -> Result<Option<u32>, WriteError> {
        let reaction = NewReaction {
            entry_id,
            emoji: emoji.to_string(),
        };
        if let Err(e) = insert_reaction(&self.backend, &reaction).await {
            warn!(entry = %reaction.entry_id, emoji, error = %e, "Failed to save reaction");
            let err = WriteError::Reaction(e);
            self.page.alert(&err.to_string());
            return Err(err);
        }

        let count = self
            .feed
            .borrow_mut()
            .record_reaction(&reaction.entry_id, emoji);
        match count {
            Some(count) => {
                self.page
                    .set_reaction_count(&reaction.entry_id, emoji, &count_label(count));
                self.page.pulse_reaction(&reaction.entry_id, emoji);
            }
            None => {
                warn!(entry = %reaction.entry_id, emoji, "Reaction stored for an entry that is not loaded");
            }
        }
        Ok(count)
    }

    pub fn open_lightbox(&self, src: &str) {
        let step = self.lightbox.borrow_mut().open(src);
        self.page.show_lightbox(src);
        self.page.schedule_lightbox(step);
    }

    pub fn close_lightbox(&self) {
        let step = self.lightbox.borrow_mut().close();
        if let Some(step) = step {
            self.page.set_lightbox_zoomed(false);
            self.page.schedule_lightbox(step);
        }
    }

    /// A lightbox timer fired
    pub fn settle_lightbox(&self, generation: u64) {
        let settled = self.lightbox.borrow_mut().settle(generation);
        match settled {
            Some(Settled::ZoomIn) => self.page.set_lightbox_zoomed(true),
            Some(Settled::Hide) => self.page.hide_lightbox(),
            None => debug!(generation, "Stale lightbox timer"),
        }
    }

    fn render(&self) {
        let markup = render_feed(self.feed.borrow().entries());
        self.page.set_feed_markup(&markup);
        self.page.refresh_icons();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::comment::PendingComment;
    use crate::app::lightbox::{CLOSE_DELAY_MS, OPEN_DELAY_MS};
    use crate::app::testing::{PageCall, RecordingPage};
    use crate::backend::{Call, Insert, MemoryBackend, Query, Table};
    use async_trait::async_trait;
    use futures_util::future::join;
    use serde_json::{json, Value};
    use std::cell::Cell;
    use std::rc::Rc;
    use tokio::sync::oneshot;

    type TestApp = FeedApp<Rc<MemoryBackend>, RecordingPage>;

    fn site() -> SiteConfig {
        SiteConfig::new("https://chaos.supabase.co", "anon-key")
    }

    fn seeded() -> Rc<MemoryBackend> {
        Rc::new(
            MemoryBackend::new()
                .with_rows(
                    Table::Entries,
                    vec![
                        json!({"id": "E", "title": "Matschpfütze", "body": "Heute *nass*.", "created_at": "2026-10-17T10:00:00Z"}),
                        json!({"id": "F", "title": "Ausflug", "created_at": "2026-10-16T10:00:00Z"}),
                    ],
                )
                .with_rows(
                    Table::Comments,
                    vec![
                        json!({"id": 2, "entry_id": "E", "author": "Papa", "body": "zweiter", "created_at": "2026-10-17T12:00:00Z"}),
                        json!({"id": 1, "entry_id": "E", "author": "Oma", "body": "erster", "created_at": "2026-10-17T11:00:00Z"}),
                    ],
                )
                .with_rows(
                    Table::Reactions,
                    vec![json!({"entry_id": "F", "emoji": "💩"})],
                ),
        )
    }

    async fn started(backend: &Rc<MemoryBackend>) -> TestApp {
        let app = FeedApp::start(&site(), RecordingPage::default(), |_| backend.clone())
            .expect("config is valid");
        app.reload(true).await.expect("feed loads");
        app
    }

    fn inserts(backend: &MemoryBackend, table: Table) -> Vec<serde_json::Value> {
        backend
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Insert(insert) if insert.table == table => Some(insert.rows),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Inserts wait until the test opens the gate
    struct GatedBackend {
        inner: Rc<MemoryBackend>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl GatedBackend {
        fn new(inner: Rc<MemoryBackend>) -> (Self, oneshot::Sender<()>) {
            let (release, gate) = oneshot::channel();
            let backend = Self {
                inner,
                gate: RefCell::new(Some(gate)),
            };
            (backend, release)
        }
    }

    #[async_trait(?Send)]
    impl Backend for GatedBackend {
        async fn select(&self, query: &Query) -> BackendResult<Vec<Value>> {
            self.inner.select(query).await
        }

        async fn insert(&self, insert: &Insert) -> BackendResult<Vec<Value>> {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.inner.insert(insert).await
        }
    }

    #[tokio::test]
    async fn test_empty_feed_shows_empty_state() {
        let backend = Rc::new(MemoryBackend::new());
        let app = started(&backend).await;

        let markup = app.page().feed_markup().unwrap();
        assert!(markup.contains("Noch nichts passiert"));
        assert!(!markup.contains("<article"));
        assert!(app.feed().entries().is_empty());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_reload_shows_loader_then_feed() {
        let backend = seeded();
        let app = started(&backend).await;

        let calls = app.page().calls();
        let loader = calls
            .iter()
            .position(|c| matches!(c, PageCall::FeedMarkup(m) if m.contains("Einträge werden geladen")))
            .unwrap();
        let feed = calls
            .iter()
            .rposition(|c| matches!(c, PageCall::FeedMarkup(m) if m.contains("post-E")))
            .unwrap();
        assert!(loader < feed);
        assert_eq!(calls.last(), Some(&PageCall::RefreshIcons));
    }

    #[tokio::test]
    async fn test_comments_render_in_time_order() {
        let backend = seeded();
        let app = started(&backend).await;

        let markup = app.page().feed_markup().unwrap();
        let first = markup.find("erster").unwrap();
        let second = markup.find("zweiter").unwrap();
        assert!(first < second);

        let feed = app.feed();
        let entry = feed.find(&RecordId::new("E")).unwrap();
        assert_eq!(entry.comments[0].body, "erster");
    }

    #[tokio::test]
    async fn test_read_failure_renders_inline() {
        let backend = seeded();
        backend.fail(Table::Entries, "relation does not exist");
        let app = FeedApp::start(&site(), RecordingPage::default(), |_| backend.clone()).unwrap();

        assert!(app.reload(false).await.is_err());
        let markup = app.page().feed_markup().unwrap();
        assert!(markup.contains("text-red-600"));
        assert!(markup.contains("relation does not exist"));
    }

    #[tokio::test]
    async fn test_blank_comment_opens_nothing() {
        let backend = seeded();
        let app = started(&backend).await;
        let calls_before = backend.call_count();

        assert!(!app.submit_comment(RecordId::new("E"), "   \t "));
        assert!(!app.page().identity_modal_open());
        assert!(app.comment_flow().is_idle());

        app.choose_persona(Persona::Mama).await.unwrap();
        assert_eq!(backend.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_comment_with_persona() {
        let backend = seeded();
        let app = started(&backend).await;

        assert!(app.submit_comment(RecordId::new("E"), "  Hi "));
        assert!(app.page().identity_modal_open());

        app.choose_persona(Persona::Mama).await.unwrap();

        assert_eq!(
            inserts(&backend, Table::Comments),
            vec![json!({"entry_id": "E", "author": "Mama", "body": "Hi"})]
        );
        assert!(app.page().has(&PageCall::ClearInput(RecordId::new("E"))));
        assert!(!app.page().identity_modal_open());
        assert!(app.comment_flow().is_idle());

        let feed = app.feed();
        let comments = &feed.find(&RecordId::new("E")).unwrap().comments;
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[2].author.as_deref(), Some("Mama"));
        assert_eq!(comments[2].body, "Hi");
        drop(feed);

        let markup = app.page().feed_markup().unwrap();
        assert!(markup.contains("Mama:"));
        assert!(markup.contains("border-pink-300"));
    }

    #[tokio::test]
    async fn test_failed_comment_keeps_prompt_and_cache() {
        let backend = seeded();
        let app = started(&backend).await;
        let before = app.feed().clone();
        backend.fail(Table::Comments, "permission denied for table comments");

        app.submit_comment(RecordId::new("E"), "Hi");
        let err = app.choose_persona(Persona::Papa).await.unwrap_err();

        assert!(matches!(err, WriteError::Comment(_)));
        assert_eq!(
            app.page().alerts(),
            vec!["Kommentar konnte nicht gespeichert werden: permission denied for table comments"]
        );
        assert_eq!(*app.feed(), before);
        assert!(app.page().identity_modal_open());
        assert_eq!(
            app.comment_flow(),
            CommentFlow::IdentityPending(PendingComment {
                entry_id: RecordId::new("E"),
                text: "Hi".to_string(),
            })
        );

        backend.recover(Table::Comments);
        app.choose_persona(Persona::Papa).await.unwrap();
        assert_eq!(app.feed().find(&RecordId::new("E")).unwrap().comments.len(), 3);
    }

    #[tokio::test]
    async fn test_cancel_discards_comment() {
        let backend = seeded();
        let app = started(&backend).await;
        let calls_before = backend.call_count();

        app.submit_comment(RecordId::new("E"), "Hi");
        app.cancel_comment();
        assert!(!app.page().identity_modal_open());

        app.choose_persona(Persona::Oma).await.unwrap();
        assert_eq!(backend.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_late_success_leaves_newer_prompt_open() {
        let (backend, release) = GatedBackend::new(seeded());
        let app = FeedApp::start(&site(), RecordingPage::default(), |_| backend).unwrap();
        app.reload(false).await.unwrap();

        app.submit_comment(RecordId::new("E"), "Hi");
        let write = app.choose_persona(Persona::Mama);
        let visitor = async {
            tokio::task::yield_now().await;
            app.cancel_comment();
            app.submit_comment(RecordId::new("F"), "Noch was");
            let _ = release.send(());
        };
        let (result, ()) = join(write, visitor).await;
        result.unwrap();

        let feed = app.feed();
        let comments = &feed.find(&RecordId::new("E")).unwrap().comments;
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[2].body, "Hi");
        drop(feed);

        assert!(app.page().has(&PageCall::ClearInput(RecordId::new("E"))));
        assert!(app.page().identity_modal_open());
        assert_eq!(
            app.comment_flow(),
            CommentFlow::IdentityPending(PendingComment {
                entry_id: RecordId::new("F"),
                text: "Noch was".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_late_failure_keeps_prompt_closed() {
        let (backend, release) = GatedBackend::new(seeded());
        let memory = backend.inner.clone();
        let app = FeedApp::start(&site(), RecordingPage::default(), |_| backend).unwrap();
        app.reload(false).await.unwrap();

        app.submit_comment(RecordId::new("E"), "Hi");
        let write = app.choose_persona(Persona::Papa);
        let visitor = async {
            tokio::task::yield_now().await;
            app.cancel_comment();
            memory.fail(Table::Comments, "offline");
            let _ = release.send(());
        };
        let (result, ()) = join(write, visitor).await;

        assert!(matches!(result, Err(WriteError::Comment(_))));
        assert_eq!(app.page().alerts().len(), 1);
        assert!(!app.page().identity_modal_open());
        assert!(app.comment_flow().is_idle());
        assert_eq!(app.feed().find(&RecordId::new("E")).unwrap().comments.len(), 2);
    }

    #[tokio::test]
    async fn test_reaction_twice_counts_two() {
        let backend = seeded();
        let app = started(&backend).await;
        app.page().clear();

        assert_eq!(app.react(RecordId::new("E"), "🐷").await.unwrap(), Some(1));
        assert_eq!(app.react(RecordId::new("E"), "🐷").await.unwrap(), Some(2));

        assert_eq!(
            inserts(&backend, Table::Reactions),
            vec![
                json!({"entry_id": "E", "emoji": "🐷"}),
                json!({"entry_id": "E", "emoji": "🐷"}),
            ]
        );
        assert!(app.page().has(&PageCall::ReactionCount {
            entry_id: RecordId::new("E"),
            emoji: "🐷".to_string(),
            label: "2".to_string(),
        }));
        assert!(app.page().has(&PageCall::Pulse {
            entry_id: RecordId::new("E"),
            emoji: "🐷".to_string(),
        }));
        assert!(app.page().feed_markup().is_none());
        assert_eq!(app.feed().reaction_count(&RecordId::new("E"), "🐷"), 2);
    }

    #[tokio::test]
    async fn test_failed_reaction_keeps_count() {
        let backend = seeded();
        let app = started(&backend).await;
        backend.fail(Table::Reactions, "offline");

        let err = app.react(RecordId::new("F"), "💩").await.unwrap_err();
        assert!(matches!(err, WriteError::Reaction(_)));
        assert_eq!(
            app.page().alerts(),
            vec!["Reaktion konnte nicht gespeichert werden: offline"]
        );
        assert_eq!(app.feed().reaction_count(&RecordId::new("F"), "💩"), 1);
    }

    #[tokio::test]
    async fn test_reaction_on_unknown_entry() {
        let backend = seeded();
        let app = started(&backend).await;
        app.page().clear();

        assert_eq!(app.react(RecordId::new("gone"), "🤣").await.unwrap(), None);
        assert_eq!(inserts(&backend, Table::Reactions).len(), 1);
        assert!(app.page().calls().is_empty());
    }

    #[test]
    fn test_missing_config_makes_no_calls() {
        for config in [
            SiteConfig::new("", ""),
            SiteConfig::new("YOUR_SUPABASE_URL", "YOUR_SUPABASE_ANON_KEY"),
            SiteConfig::new("https://chaos.supabase.co", "YOUR_SUPABASE_ANON_KEY"),
        ] {
            let backend = seeded();
            let connected = Cell::new(false);
            let result = FeedApp::start(&config, RecordingPage::default(), |_| {
                connected.set(true);
                backend.clone()
            });

            let Err(err) = result else {
                panic!("config should be rejected");
            };
            assert!(matches!(
                err,
                ConfigError::Missing(_) | ConfigError::Placeholder(_)
            ));
            assert!(!connected.get());
            assert_eq!(backend.call_count(), 0);
        }
    }

    #[test]
    fn test_missing_config_shows_warning() {
        let page = Rc::new(RecordingPage::default());
        let config = SiteConfig::new("YOUR_SUPABASE_URL", "key");
        let result = FeedApp::start(&config, page.clone(), |_| Rc::new(MemoryBackend::new()));
        assert!(result.is_err());

        assert!(page.has(&PageCall::ConfigWarning));
        let markup = page.feed_markup().unwrap();
        assert!(markup.contains("Das Chaos-Funkgerät schnarcht!"));
        assert!(!markup.contains("<article"));
    }

    #[test]
    fn test_start_renders_choices() {
        let app: TestApp =
            FeedApp::start(&site(), RecordingPage::default(), |_| Rc::new(MemoryBackend::new()))
                .unwrap();
        let calls = app.page().calls();
        assert!(matches!(&calls[0], PageCall::IdentityChoices(m) if m.contains("data-identity=\"Wonkel\"")));
        assert!(!app.page().has(&PageCall::ConfigWarning));
    }

    #[test]
    fn test_lightbox_flow() {
        let app: TestApp =
            FeedApp::start(&site(), RecordingPage::default(), |_| Rc::new(MemoryBackend::new()))
                .unwrap();
        app.page().clear();

        app.open_lightbox("bild.jpg");
        let calls = app.page().calls();
        assert_eq!(calls[0], PageCall::ShowLightbox("bild.jpg".to_string()));
        let PageCall::Schedule(open) = calls[1].clone() else {
            panic!("expected a scheduled timer");
        };
        assert_eq!(open.delay_ms, OPEN_DELAY_MS);

        app.settle_lightbox(open.generation);
        assert_eq!(app.lightbox_phase(), LightboxPhase::Open("bild.jpg".to_string()));
        assert!(app.page().has(&PageCall::LightboxZoomed(true)));

        app.page().clear();
        app.close_lightbox();
        let calls = app.page().calls();
        assert_eq!(calls[0], PageCall::LightboxZoomed(false));
        let PageCall::Schedule(close) = calls[1].clone() else {
            panic!("expected a scheduled timer");
        };
        assert_eq!(close.delay_ms, CLOSE_DELAY_MS);

        // reopened before the hide timer fired
        app.open_lightbox("zwei.jpg");
        app.settle_lightbox(close.generation);
        assert!(!app.page().has(&PageCall::HideLightbox));
        assert_eq!(app.lightbox_phase(), LightboxPhase::Opening("zwei.jpg".to_string()));
    }
}

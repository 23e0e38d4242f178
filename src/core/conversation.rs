//! Conversation state: the message log, the model catalog, and the
//! submission gate.
//!
//! This is a pure state container; no I/O happens here. The event loop
//! owns the network side: a successful [`Conversation::submit`] hands back
//! a [`PendingChat`] ticket, the caller performs the request, and the
//! outcome comes back through [`Conversation::resolve_chat`]. That split is
//! what keeps every transition testable without a terminal or a server.

use std::collections::VecDeque;

use crate::api::ModelEntry;
use crate::core::constants::{CHAT_FALLBACK_TEXT, DEMO_MODEL_ID, DEMO_MODEL_LABEL};
use crate::core::message::Message;

/// Ticket for one in-flight chat request. The generation stamps which
/// transcript the reply belongs to; replies from a cleared transcript are
/// dropped on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChat {
    pub generation: u64,
    pub text: String,
}

/// Display state of the model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    /// A fetch is (or is about to be) in flight and nothing has loaded yet.
    Loading,
    /// The cached set reflects the last successful fetch.
    Loaded,
    /// The last fetch failed. The cached set keeps its prior value.
    Failed,
}

/// One row of the model selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorEntry {
    pub id: String,
    pub label: String,
}

pub struct Conversation {
    messages: VecDeque<Message>,
    models: Vec<ModelEntry>,
    catalog: CatalogState,
    /// Generation of the in-flight submit, if any. Doubles as the
    /// submission gate: `Some` while a chat request is outstanding.
    inflight: Option<u64>,
    /// Bumped by `clear()`. Replies stamped with an older generation
    /// resolved against a transcript that no longer exists.
    generation: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            models: Vec::new(),
            catalog: CatalogState::Loading,
            inflight: None,
            generation: 0,
        }
    }

    pub fn messages(&self) -> &VecDeque<Message> {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_sending(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn catalog(&self) -> CatalogState {
        self.catalog
    }

    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Accept user input for submission.
    ///
    /// Whitespace-only input is a silent no-op. A submit while another is
    /// outstanding is rejected here, in the state layer, rather than by a
    /// disabled widget. On acceptance the user message lands in the
    /// transcript immediately, before any network activity, and the
    /// returned ticket carries the trimmed text to send.
    pub fn submit(&mut self, text: &str) -> Option<PendingChat> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.inflight.is_some() {
            return None;
        }

        self.messages.push_back(Message::user(trimmed));
        self.inflight = Some(self.generation);

        Some(PendingChat {
            generation: self.generation,
            text: trimmed.to_string(),
        })
    }

    /// Apply the outcome of a chat request.
    ///
    /// The gate opens again no matter how the request ended. A reply whose
    /// generation predates the current transcript is dropped: its user
    /// message was already discarded by `clear()`, so appending the reply
    /// would orphan it. Failures append the fixed fallback text; the raw
    /// error only reaches the diagnostic channel.
    pub fn resolve_chat(&mut self, generation: u64, outcome: Result<String, String>) {
        if self.inflight == Some(generation) {
            self.inflight = None;
        }

        if generation != self.generation {
            tracing::debug!("dropping chat reply for a cleared transcript");
            return;
        }

        match outcome {
            Ok(reply) => {
                self.messages.push_back(Message::assistant(reply));
            }
            Err(e) => {
                tracing::warn!("chat request failed: {e}");
                self.messages.push_back(Message::assistant(CHAT_FALLBACK_TEXT));
            }
        }
    }

    /// Empty the transcript unconditionally. No confirmation, no undo.
    /// The welcome placeholder is a rendering consequence of the log being
    /// empty, not separate state.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Mark the catalog as loading ahead of a refresh.
    pub fn begin_model_refresh(&mut self) {
        self.catalog = CatalogState::Loading;
    }

    /// Apply the outcome of a catalog fetch. Success replaces the cached
    /// set wholesale; failure leaves the prior set in place and only flips
    /// the display state.
    pub fn apply_models(&mut self, outcome: Result<Vec<ModelEntry>, String>) {
        match outcome {
            Ok(models) => {
                self.models = models;
                self.catalog = CatalogState::Loaded;
            }
            Err(e) => {
                tracing::warn!("model refresh failed: {e}");
                self.catalog = CatalogState::Failed;
            }
        }
    }

    /// The model selection list: the synthetic demo entry first, then one
    /// row per cached descriptor.
    pub fn selector_entries(&self) -> Vec<SelectorEntry> {
        let mut entries = Vec::with_capacity(self.models.len() + 1);
        entries.push(SelectorEntry {
            id: DEMO_MODEL_ID.to_string(),
            label: DEMO_MODEL_LABEL.to_string(),
        });
        for model in &self.models {
            entries.push(SelectorEntry {
                id: model.id.clone(),
                label: format!("{} ({})", model.name, model.provider),
            });
        }
        entries
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    fn sample_models() -> Vec<ModelEntry> {
        vec![ModelEntry {
            id: "m1".to_string(),
            name: "Model One".to_string(),
            provider: "Acme".to_string(),
        }]
    }

    #[test]
    fn whitespace_only_submit_is_a_no_op() {
        let mut convo = Conversation::new();
        assert!(convo.submit("").is_none());
        assert!(convo.submit("   \t  ").is_none());
        assert!(convo.is_empty());
        assert!(!convo.is_sending());
    }

    #[test]
    fn submit_appends_user_message_before_any_reply() {
        let mut convo = Conversation::new();
        let pending = convo.submit("hello").expect("submit accepted");

        assert_eq!(pending.text, "hello");
        assert_eq!(convo.messages().len(), 1);
        assert_eq!(convo.messages()[0].role, Role::User);
        assert_eq!(convo.messages()[0].content, "hello");
        assert!(convo.is_sending());
    }

    #[test]
    fn submit_trims_surrounding_whitespace() {
        let mut convo = Conversation::new();
        let pending = convo.submit("  hello  ").unwrap();
        assert_eq!(pending.text, "hello");
        assert_eq!(convo.messages()[0].content, "hello");
    }

    #[test]
    fn successful_reply_completes_the_turn_in_order() {
        let mut convo = Conversation::new();
        let pending = convo.submit("hello").unwrap();

        convo.resolve_chat(pending.generation, Ok("hi there".to_string()));

        assert_eq!(convo.messages().len(), 2);
        assert_eq!(convo.messages()[0].role, Role::User);
        assert_eq!(convo.messages()[0].content, "hello");
        assert_eq!(convo.messages()[1].role, Role::Assistant);
        assert_eq!(convo.messages()[1].content, "hi there");
        assert!(!convo.is_sending());
    }

    #[test]
    fn failed_reply_appends_fallback_and_releases_the_gate() {
        let mut convo = Conversation::new();
        let pending = convo.submit("hello").unwrap();

        convo.resolve_chat(pending.generation, Err("status 500".to_string()));

        assert_eq!(convo.messages().len(), 2);
        assert_eq!(convo.messages()[1].role, Role::Assistant);
        assert_eq!(convo.messages()[1].content, CHAT_FALLBACK_TEXT);

        // A subsequent submit must be accepted.
        assert!(convo.submit("again").is_some());
    }

    #[test]
    fn second_submit_is_rejected_while_one_is_outstanding() {
        let mut convo = Conversation::new();
        let first = convo.submit("first").unwrap();
        assert!(convo.submit("second").is_none());
        assert_eq!(convo.messages().len(), 1);

        convo.resolve_chat(first.generation, Ok("ok".to_string()));
        assert!(convo.submit("second").is_some());
    }

    #[test]
    fn clear_empties_a_log_of_any_size() {
        let mut convo = Conversation::new();
        for i in 0..5 {
            let pending = convo.submit(&format!("msg {i}")).unwrap();
            convo.resolve_chat(pending.generation, Ok("reply".to_string()));
        }
        assert_eq!(convo.messages().len(), 10);

        convo.clear();
        assert!(convo.is_empty());

        convo.clear();
        assert!(convo.is_empty());
    }

    #[test]
    fn reply_arriving_after_clear_is_dropped() {
        let mut convo = Conversation::new();
        let pending = convo.submit("hello").unwrap();

        convo.clear();
        convo.resolve_chat(pending.generation, Ok("too late".to_string()));

        assert!(convo.is_empty());
        // The stale flight's gate is released.
        assert!(!convo.is_sending());
    }

    #[test]
    fn stale_reply_does_not_release_a_newer_flight() {
        let mut convo = Conversation::new();
        let old = convo.submit("first").unwrap();
        convo.clear();
        convo.resolve_chat(old.generation, Err("aborted".to_string()));

        let fresh = convo.submit("second").unwrap();
        assert!(convo.is_sending());

        // The old flight resolving again must not open the new gate.
        convo.resolve_chat(old.generation, Ok("ghost".to_string()));
        assert!(convo.is_sending());
        assert_eq!(convo.messages().len(), 1);

        convo.resolve_chat(fresh.generation, Ok("real".to_string()));
        assert!(!convo.is_sending());
        assert_eq!(convo.messages().len(), 2);
    }

    #[test]
    fn successful_refresh_replaces_the_cached_set() {
        let mut convo = Conversation::new();
        assert_eq!(convo.catalog(), CatalogState::Loading);

        convo.apply_models(Ok(sample_models()));
        assert_eq!(convo.catalog(), CatalogState::Loaded);
        assert_eq!(convo.models().len(), 1);
        assert_eq!(convo.models()[0].id, "m1");
    }

    #[test]
    fn failed_refresh_keeps_the_prior_set() {
        let mut convo = Conversation::new();
        convo.apply_models(Ok(sample_models()));

        convo.begin_model_refresh();
        assert_eq!(convo.catalog(), CatalogState::Loading);

        convo.apply_models(Err("connection refused".to_string()));
        assert_eq!(convo.catalog(), CatalogState::Failed);
        assert_eq!(convo.models().len(), 1);
        assert_eq!(convo.models()[0].name, "Model One");
    }

    #[test]
    fn selector_always_leads_with_the_demo_entry() {
        let mut convo = Conversation::new();
        let entries = convo.selector_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, DEMO_MODEL_ID);

        convo.apply_models(Ok(sample_models()));
        let entries = convo.selector_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, DEMO_MODEL_LABEL);
        assert_eq!(entries[1].label, "Model One (Acme)");
    }

    #[test]
    fn chat_and_catalog_state_stay_disjoint() {
        let mut convo = Conversation::new();
        let pending = convo.submit("hello").unwrap();

        // A catalog refresh resolving mid-flight touches neither the
        // transcript nor the gate.
        convo.apply_models(Ok(sample_models()));
        assert!(convo.is_sending());
        assert_eq!(convo.messages().len(), 1);

        convo.resolve_chat(pending.generation, Ok("hi".to_string()));
        assert_eq!(convo.models().len(), 1);
    }
}

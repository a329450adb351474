//! Application state and key handling
//!
//! [`Reviewer`] owns everything the screen shows and turns key presses into
//! session operations. It does not touch the terminal, so it can be driven
//! directly in tests.

use crate::input::IndexInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pr_core::error::ReviewError;
use pr_core::export::ExportManager;
use pr_core::record::Record;
use pr_core::session::{BucketStore, Decision, ReviewSession, SessionState};
use pr_core::types::SessionId;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Choosing the starting index
    #[default]
    SelectStart,
    /// Classifying records
    Review,
    /// All records classified
    Complete,
    /// Help overlay
    Help,
}

/// Application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Mode to return to when help closes
    pub help_return: AppMode,
    /// Status message
    pub message: Option<String>,
    /// Whether the message is a warning
    pub message_is_warning: bool,
    /// Should quit
    pub should_quit: bool,
    /// Starting index editor
    pub index_input: IndexInput,
    /// Show the raw record JSON instead of the prompt
    pub show_raw: bool,
    /// Where the last export was written
    pub last_export: Option<PathBuf>,
}

impl AppState {
    /// Create a new app state
    pub fn new() -> Self {
        Self {
            index_input: IndexInput::with_value(0),
            ..Default::default()
        }
    }

    /// Set status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_warning = false;
    }

    /// Set a warning message
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_warning = true;
    }

    /// Clear status message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_is_warning = false;
    }
}

/// Where and how exports are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// Export format name
    pub format: String,
    /// Destination file
    pub path: PathBuf,
}

/// Review front-end logic
pub struct Reviewer {
    /// UI state
    pub state: AppState,
    /// Records waiting for the start gate; moved into the session on start
    pending: Vec<Record>,
    record_count: usize,
    session_id: SessionId,
    store: Arc<dyn BucketStore>,
    session: Option<ReviewSession>,
    exports: ExportManager,
    target: ExportTarget,
}

impl Reviewer {
    /// Create a reviewer waiting at the start gate
    pub fn new(
        records: Vec<Record>,
        store: Arc<dyn BucketStore>,
        session_id: SessionId,
        target: ExportTarget,
    ) -> Self {
        Self {
            state: AppState::new(),
            record_count: records.len(),
            pending: records,
            session_id,
            store,
            session: None,
            exports: ExportManager::new(),
            target,
        }
    }

    /// Number of records in the input
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// The running session, once the start index is confirmed
    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    /// Export destination
    pub fn export_target(&self) -> &ExportTarget {
        &self.target
    }

    /// Start the session at `start_index`, leaving the gate.
    ///
    /// On an invalid index nothing changes and the gate stays open.
    pub fn start(&mut self, start_index: usize) -> pr_core::Result<()> {
        if self.session.is_some() {
            return Err(ReviewError::Validation(
                "Starting index is already confirmed".to_string(),
            ));
        }
        SessionState::check_start_index(self.record_count, start_index)?;

        let records = std::mem::take(&mut self.pending);
        let session = ReviewSession::start_with_id(
            self.session_id.clone(),
            records,
            start_index,
            self.store.clone(),
        )?;
        self.session = Some(session);
        self.state.mode = AppMode::Review;
        self.state.clear_message();
        Ok(())
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.should_quit = true;
            return;
        }

        match self.state.mode {
            AppMode::SelectStart => self.handle_select_start(key),
            AppMode::Review => self.handle_review(key),
            AppMode::Complete => self.handle_complete(key),
            AppMode::Help => self.handle_help(key),
        }
    }

    fn handle_select_start(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.state.index_input.push(c);
            }
            KeyCode::Backspace => self.state.index_input.backspace(),
            KeyCode::Up => self.step_index(1),
            KeyCode::Down => self.step_index(-1),
            KeyCode::Enter => self.confirm_start(),
            _ => {}
        }
    }

    fn step_index(&mut self, delta: isize) {
        let current = self.state.index_input.value().unwrap_or(0);
        let max = self.record_count.saturating_sub(1);
        let next = current.saturating_add_signed(delta).min(max);
        self.state.index_input = IndexInput::with_value(next);
    }

    fn confirm_start(&mut self) {
        let Some(index) = self.state.index_input.value() else {
            self.state.set_warning("Enter a starting index");
            return;
        };

        if let Err(e) = self.start(index) {
            self.state.set_warning(e.to_string());
        }
    }

    fn handle_review(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Char('k') => self.classify(Decision::Keep),
            KeyCode::Char('d') => self.classify(Decision::Discard),
            KeyCode::Char('s') => self.classify(Decision::Skip),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('w') => self.retry_persist(),
            KeyCode::Char('r') => self.state.show_raw = !self.state.show_raw,
            _ => {}
        }
    }

    fn handle_complete(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('w') => self.retry_persist(),
            _ => {}
        }
    }

    fn open_help(&mut self) {
        self.state.help_return = self.state.mode;
        self.state.mode = AppMode::Help;
    }

    fn handle_help(&mut self, _key: KeyEvent) {
        self.state.mode = self.state.help_return;
    }

    /// Apply a decision to the current record
    pub fn classify(&mut self, decision: Decision) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.classify(decision) {
            Ok(outcome) => {
                if let Some(err) = outcome.persist_errors.first() {
                    self.state
                        .set_warning(format!("Warning: {} (press w to retry)", err));
                } else if outcome.completed() {
                    self.state.set_message("Review complete!");
                } else {
                    self.state.set_message(format!(
                        "Record {} -> {}",
                        outcome.index + 1,
                        decision.bucket_label()
                    ));
                }
                if outcome.completed() {
                    self.state.mode = AppMode::Complete;
                    self.state.show_raw = false;
                }
            }
            Err(e) => self.state.set_warning(e.to_string()),
        }
    }

    /// Write the current buckets to the export target
    pub fn export(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        match self
            .exports
            .export_to_file(session.buckets(), &self.target.format, &self.target.path)
        {
            Ok(path) => {
                info!("Exported session {} to {:?}", session.id(), path);
                self.state
                    .set_message(format!("Exported to {}", path.display()));
                self.state.last_export = Some(path);
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.state.set_warning(format!("Export failed: {}", e));
            }
        }
    }

    /// Rewrite buckets whose store is out of date
    pub fn retry_persist(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.stale_buckets().is_empty() {
            self.state.set_message("All buckets saved");
            return;
        }

        let errors = session.flush();
        match errors.first() {
            Some(err) => self.state.set_warning(format!("Warning: {}", err)),
            None => self.state.set_message("Buckets saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_core::session::{MemoryStore, SessionStatus};
    use serde_json::json;
    use tempfile::TempDir;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_records() -> Vec<Record> {
        serde_json::from_value(json!([
            {"prompt": "A"},
            {"prompt": "B", "previewUrl": "u"},
            {"prompt": "C"}
        ]))
        .unwrap()
    }

    fn reviewer_in(dir: &TempDir) -> (Reviewer, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let target = ExportTarget {
            format: "zip".to_string(),
            path: dir.path().join("prompt_reviews.zip"),
        };
        let reviewer = Reviewer::new(
            sample_records(),
            store.clone(),
            SessionId::generate(),
            target,
        );
        (reviewer, store)
    }

    #[test]
    fn test_app_mode_default() {
        assert_eq!(AppMode::default(), AppMode::SelectStart);
    }

    #[test]
    fn test_app_state_message() {
        let mut state = AppState::new();
        assert!(state.message.is_none());
        state.set_warning("Careful");
        assert!(state.message_is_warning);
        state.set_message("Test");
        assert_eq!(state.message, Some("Test".to_string()));
        assert!(!state.message_is_warning);
        state.clear_message();
        assert!(state.message.is_none());
    }

    #[test]
    fn test_gate_blocks_decisions() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, store) = reviewer_in(&dir);

        reviewer.handle_key(key('k'));
        assert!(reviewer.session().is_none());
        assert_eq!(store.write_count(), 0);
        assert_eq!(reviewer.state.mode, AppMode::SelectStart);
    }

    #[test]
    fn test_gate_rejects_out_of_range() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, _store) = reviewer_in(&dir);

        reviewer.handle_key(key('5'));
        reviewer.handle_key(code(KeyCode::Enter));
        assert!(reviewer.session().is_none());
        assert!(reviewer.state.message_is_warning);

        reviewer.handle_key(code(KeyCode::Backspace));
        reviewer.handle_key(key('1'));
        reviewer.handle_key(code(KeyCode::Enter));
        assert_eq!(reviewer.state.mode, AppMode::Review);
        assert_eq!(reviewer.session().unwrap().state().start_index(), 1);
    }

    #[test]
    fn test_gate_arrow_keys_clamp() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, _store) = reviewer_in(&dir);

        for _ in 0..5 {
            reviewer.handle_key(code(KeyCode::Up));
        }
        assert_eq!(reviewer.state.index_input.value(), Some(2));
        reviewer.handle_key(code(KeyCode::Down));
        assert_eq!(reviewer.state.index_input.value(), Some(1));
    }

    #[test]
    fn test_full_review_by_keys() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, store) = reviewer_in(&dir);

        reviewer.handle_key(code(KeyCode::Enter));
        reviewer.handle_key(key('k'));
        reviewer.handle_key(key('s'));
        reviewer.handle_key(key('d'));

        let session = reviewer.session().unwrap();
        assert_eq!(session.status(), SessionStatus::Complete);
        assert_eq!(reviewer.state.mode, AppMode::Complete);
        assert_eq!(session.buckets().kept[0].prompt(), "A");
        assert_eq!(session.buckets().skipped[0].prompt(), "B");
        assert_eq!(session.buckets().discarded[0].prompt(), "C");
        assert_eq!(
            store.load(Decision::Skip).unwrap().unwrap(),
            session.buckets().skipped
        );

        // Decisions are ignored once complete
        reviewer.handle_key(key('k'));
        assert_eq!(reviewer.session().unwrap().buckets().total(), 3);
    }

    #[test]
    fn test_export_key_writes_archive() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, _store) = reviewer_in(&dir);

        reviewer.start(0).unwrap();
        reviewer.handle_key(key('e'));

        let path = dir.path().join("prompt_reviews.zip");
        assert!(path.exists());
        assert_eq!(reviewer.state.last_export, Some(path));
    }

    #[test]
    fn test_start_twice_rejected() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, _store) = reviewer_in(&dir);

        reviewer.start(2).unwrap();
        assert!(reviewer.start(0).is_err());
        assert_eq!(reviewer.session().unwrap().state().start_index(), 2);
    }

    #[test]
    fn test_help_returns_to_previous_mode() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, _store) = reviewer_in(&dir);

        reviewer.start(0).unwrap();
        reviewer.handle_key(key('?'));
        assert_eq!(reviewer.state.mode, AppMode::Help);
        reviewer.handle_key(key('x'));
        assert_eq!(reviewer.state.mode, AppMode::Review);
    }

    #[test]
    fn test_raw_toggle_and_quit() {
        let dir = TempDir::new().unwrap();
        let (mut reviewer, _store) = reviewer_in(&dir);

        reviewer.start(0).unwrap();
        reviewer.handle_key(key('r'));
        assert!(reviewer.state.show_raw);
        reviewer.handle_key(key('q'));
        assert!(reviewer.state.should_quit);
    }
}

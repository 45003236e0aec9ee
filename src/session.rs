//! The "today" screen: in-memory mood/note state with debounced auto-save.
//!
//! Every edit cancels the pending save and schedules a new one, so a burst
//! of edits produces a single write once input has been quiet for
//! `save_delay`. A save only happens while a mood is selected; clearing the
//! mood leaves any stored entry for today untouched.

use crate::dates::{format_for_display, today};
use crate::history::{entry_views, sort_entries, sorted_entries, summarize};
use crate::models::{EntryView, HistorySummary, MoodEntry, NewMoodEntry, truncate_note};
use crate::storage::MoodStorage;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Loading,
    Ready,
}

/// What the page's save indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    Saving,
    Saved,
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub date: String,
    pub display_date: String,
    pub mood: String,
    pub note: String,
    pub dirty: bool,
    pub status: SaveStatus,
    pub history: Vec<EntryView>,
    pub summary: HistorySummary,
}

struct SessionState {
    phase: SessionPhase,
    mood: String,
    note: String,
    dirty: bool,
    history: Vec<MoodEntry>,
    pending: Option<JoinHandle<()>>,
    // Bumped on every schedule/flush; a timer that wakes with an older value
    // has been superseded.
    generation: u64,
}

struct SessionInner {
    storage: MoodStorage,
    save_delay: Duration,
    state: Mutex<SessionState>,
}

#[derive(Clone)]
pub struct MoodSession {
    inner: Arc<SessionInner>,
}

impl MoodSession {
    pub fn new(storage: MoodStorage, save_delay: Duration) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                storage,
                save_delay,
                state: Mutex::new(SessionState {
                    phase: SessionPhase::Loading,
                    mood: String::new(),
                    note: String::new(),
                    dirty: false,
                    history: Vec::new(),
                    pending: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Reads today's entry and the history once, then enters `Ready`.
    pub fn load(&self) {
        let mut state = self.state();
        if state.phase == SessionPhase::Ready {
            return;
        }

        let data = self.inner.storage.get_all();
        if let Some(entry) = data.get(&today()) {
            state.mood = entry.mood.clone();
            state.note = entry.note.clone();
        }
        state.history = sort_entries(data);
        state.phase = SessionPhase::Ready;
        info!(entries = state.history.len(), "mood journal loaded");
    }

    pub fn select_mood(&self, mood: impl Into<String>) {
        let mood = mood.into();
        self.update(move |state| state.mood = mood);
    }

    pub fn edit_note(&self, note: &str) {
        let note = truncate_note(note);
        self.update(move |state| state.note = note);
    }

    /// Empties mood and note. Nothing is written, so an entry already stored
    /// for today survives.
    pub fn clear_today(&self) {
        self.update(|state| {
            state.mood.clear();
            state.note.clear();
        });
    }

    /// Cancels any pending auto-save and saves right away. Returns whether
    /// an entry was written.
    pub fn flush(&self) -> bool {
        let mut state = self.state();
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        state.generation += 1;
        if state.phase != SessionPhase::Ready {
            return false;
        }
        self.persist(&mut state)
    }

    /// Re-reads the cached history after the journal changed elsewhere.
    pub fn refresh_history(&self) {
        let mut state = self.state();
        state.history = sorted_entries(&self.inner.storage);
    }

    pub fn has_pending_save(&self) -> bool {
        self.state()
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        let date = today();
        let status = if state.dirty {
            SaveStatus::Saving
        } else if !state.mood.is_empty() || !state.note.is_empty() {
            SaveStatus::Saved
        } else {
            SaveStatus::Empty
        };

        SessionSnapshot {
            phase: state.phase,
            display_date: format_for_display(&date),
            date,
            mood: state.mood.clone(),
            note: state.note.clone(),
            dirty: state.dirty,
            status,
            summary: summarize(&state.history),
            history: entry_views(state.history.clone()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut SessionState)) {
        let mut state = self.state();
        apply(&mut state);
        state.dirty = true;
        if state.phase == SessionPhase::Ready {
            self.schedule_save(&mut state);
        }
    }

    fn schedule_save(&self, state: &mut SessionState) {
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        state.generation += 1;
        let generation = state.generation;

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime; auto-save deferred until flush");
            return;
        };
        let session = self.clone();
        let delay = self.inner.save_delay;
        state.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            session.fire(generation);
        }));
    }

    fn fire(&self, generation: u64) {
        let mut state = self.state();
        if state.generation != generation {
            return;
        }
        state.pending = None;
        self.persist(&mut state);
    }

    fn persist(&self, state: &mut SessionState) -> bool {
        if state.mood.is_empty() {
            debug!("no mood selected, skipping save");
            return false;
        }

        let saved = self.inner.storage.save(NewMoodEntry {
            date: today(),
            mood: state.mood.clone(),
            note: state.note.clone(),
        });
        if saved {
            state.dirty = false;
            state.history = sorted_entries(&self.inner.storage);
        } else {
            warn!("auto-save failed; changes remain unsaved");
        }
        saved
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

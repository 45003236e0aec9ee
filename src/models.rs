use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_NOTE_CHARS: usize = 250;
pub const MAX_MOOD_CHARS: usize = 32;

/// One day's recorded mood. `date` is the primary key of the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: String,
    pub mood: String,
    pub note: String,
    /// Milliseconds since the Unix epoch of the last write.
    pub timestamp: i64,
}

/// A mood entry as submitted for saving; the timestamp is assigned on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMoodEntry {
    pub date: String,
    pub mood: String,
    pub note: String,
}

/// The whole persisted journal, keyed by `YYYY-MM-DD`.
pub type MoodData = BTreeMap<String, MoodEntry>;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoodOption {
    pub emoji: &'static str,
    pub label: &'static str,
    pub value: &'static str,
}

pub const MOOD_OPTIONS: [MoodOption; 7] = [
    MoodOption {
        emoji: "😊",
        label: "Happy",
        value: "happy",
    },
    MoodOption {
        emoji: "😌",
        label: "Content",
        value: "content",
    },
    MoodOption {
        emoji: "😐",
        label: "Neutral",
        value: "neutral",
    },
    MoodOption {
        emoji: "😔",
        label: "Sad",
        value: "sad",
    },
    MoodOption {
        emoji: "😢",
        label: "Very Sad",
        value: "very-sad",
    },
    MoodOption {
        emoji: "😡",
        label: "Angry",
        value: "angry",
    },
    MoodOption {
        emoji: "😴",
        label: "Tired",
        value: "tired",
    },
];

pub fn mood_label(mood: &str) -> Option<&'static str> {
    MOOD_OPTIONS
        .iter()
        .find(|option| option.emoji == mood)
        .map(|option| option.label)
}

/// Cuts `note` down to [`MAX_NOTE_CHARS`] characters.
pub fn truncate_note(note: &str) -> String {
    note.chars().take(MAX_NOTE_CHARS).collect()
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlushResponse {
    pub saved: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// A history row as rendered by the list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: MoodEntry,
    pub display_date: String,
    pub logged_at: String,
    pub is_today: bool,
    pub is_recent: bool,
    pub label: Option<String>,
}

/// Totals shown under the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_entries: usize,
    pub weeks_tracked: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub entry: Option<MoodEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub prev: MonthRef,
    pub next: MonthRef,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

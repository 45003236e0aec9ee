//! Journal persistence over a [`KeyValueStore`].
//!
//! The whole journal lives as one JSON object under a single key. Every
//! mutation reads the full document, changes it, and writes it back, so the
//! last writer always wins. Failures never reach the caller: reads degrade to
//! an empty journal and writes report `false`, with the cause logged.

use crate::dates::{parse_date_key, today};
use crate::errors::StoreError;
use crate::kv::KeyValueStore;
use crate::models::{MoodData, MoodEntry, NewMoodEntry, truncate_note};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};

pub const STORAGE_KEY: &str = "mood-journal-data";

#[derive(Clone)]
pub struct MoodStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl MoodStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The full journal, or an empty one if it is missing, corrupt, or the
    /// store cannot be read.
    pub fn get_all(&self) -> MoodData {
        match self.load() {
            Ok(data) => data,
            Err(err) => {
                error!("failed to read mood data: {err}");
                MoodData::new()
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<MoodEntry> {
        self.get_all().remove(date)
    }

    pub fn get_today(&self) -> Option<MoodEntry> {
        self.get(&today())
    }

    /// Inserts or replaces the entry for `entry.date`, stamping it with the
    /// current time. An unreadable document is replaced by a fresh one.
    pub fn save(&self, entry: NewMoodEntry) -> bool {
        match self.try_save(entry) {
            Ok(saved) => {
                debug!(date = %saved.date, "saved mood entry");
                true
            }
            Err(err) => {
                error!("failed to save mood entry: {err}");
                false
            }
        }
    }

    pub fn delete(&self, date: &str) -> bool {
        let mut data = self.get_all();
        data.remove(date);
        match self.persist(&data) {
            Ok(()) => true,
            Err(err) => {
                error!("failed to delete mood entry {date}: {err}");
                false
            }
        }
    }

    /// Drops the whole journal.
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(err) => {
                error!("failed to clear mood data: {err}");
                false
            }
        }
    }

    fn try_save(&self, entry: NewMoodEntry) -> Result<MoodEntry, StoreError> {
        parse_date_key(&entry.date)?;
        let mut data = self.get_all();

        let mut timestamp = Utc::now().timestamp_millis();
        if let Some(previous) = data.get(&entry.date) {
            timestamp = timestamp.max(previous.timestamp + 1);
        }

        let saved = MoodEntry {
            date: entry.date,
            mood: entry.mood,
            note: truncate_note(&entry.note),
            timestamp,
        };
        data.insert(saved.date.clone(), saved.clone());
        self.persist(&data)?;
        Ok(saved)
    }

    fn load(&self) -> Result<MoodData, StoreError> {
        match self.store.read(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(MoodData::new()),
        }
    }

    fn persist(&self, data: &MoodData) -> Result<(), StoreError> {
        let payload = serde_json::to_string(data)?;
        self.store.write(&self.key, &payload)
    }
}

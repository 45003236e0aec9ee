use crate::session::DEFAULT_SAVE_DELAY;
use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory holding the key-value store files.
    pub data_path: PathBuf,
    pub storage: StorageBackend,
    pub save_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let delay_ms = parse_or_default(
            &lookup,
            "MOOD_SAVE_DELAY_MS",
            DEFAULT_SAVE_DELAY.as_millis() as u64,
        );

        let storage = match lookup("APP_STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                warn!("unknown APP_STORAGE {other:?}, using file storage");
                StorageBackend::File
            }
        };

        Self {
            port,
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            storage,
            save_delay: Duration::from_millis(delay_ms),
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {name}={value:?}");
            default
        }),
        None => default,
    }
}

pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod kv;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::{Config, StorageBackend};
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use session::MoodSession;
pub use state::AppState;
pub use storage::MoodStorage;

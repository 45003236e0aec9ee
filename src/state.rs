use crate::session::MoodSession;
use crate::storage::MoodStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: MoodStorage,
    pub session: MoodSession,
}

impl AppState {
    /// Builds the app state and loads today's session from `storage`.
    pub fn new(storage: MoodStorage, session: MoodSession) -> Self {
        session.load();
        Self { storage, session }
    }
}

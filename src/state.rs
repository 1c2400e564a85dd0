use crate::storage::PracticeLog;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub log: PracticeLog,
    /// Serializes read-modify-write cycles so there is one writer at a time.
    pub writer: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(log: PracticeLog) -> Self {
        Self {
            log,
            writer: Arc::new(Mutex::new(())),
        }
    }
}

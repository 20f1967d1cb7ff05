use crate::storage::KeyValueStore;
use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, tracker: Tracker) -> Self {
        Self {
            store,
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}

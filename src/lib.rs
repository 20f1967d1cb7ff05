pub mod app;
pub mod calendar;
pub mod config;
pub mod entries;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_snapshot, save_snapshot, FileStore, KeyValueStore, MemoryStore};
pub use tracker::Tracker;

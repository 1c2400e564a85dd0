pub mod app;
pub mod calendar;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod resources;
pub mod seed;
pub mod sessions;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use stats::{compute_stats, compute_stats_at, motivation_message};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, PracticeLog};

pub mod api;
pub mod api_doc;
pub mod config;
pub mod server;
pub mod state;
pub mod ui;

pub use config::{Config, ConfigError};
pub use server::run_server;
pub use state::AppState;

mod app;
mod config;
mod health;
pub mod room;
pub mod signaling;

pub use app::{AppState, router, serve, serve_listener};
pub use config::ServerConfig;
pub use room::*;
pub use signaling::*;

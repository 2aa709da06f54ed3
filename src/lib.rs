pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod ui;
pub mod validation;

pub use app::router;
pub use client::PlanClient;
pub use config::Config;
pub use state::AppState;

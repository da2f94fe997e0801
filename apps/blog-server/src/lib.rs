//! # Blog API Server
//!
//! Actix-web service exposing CRUD over blog posts at `/posts`.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use server::{RunningServer, start};
pub use state::AppState;

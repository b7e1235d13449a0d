//! HTTP server
//!
//! Actix-web application exposing the dashboard API, the public booking
//! page and the cancellation links.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
mod utils;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;

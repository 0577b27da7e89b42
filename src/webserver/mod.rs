//! HTTP trigger surface

mod server;

pub mod models;
pub mod routes;
pub mod state;

pub use server::{bind_listener, build_app, serve};
pub use state::AppState;

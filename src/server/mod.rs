//! HTTP API: list, extract and health endpoints behind a JSON envelope.

pub mod app;
pub mod response;
pub mod routes;

pub use app::{AppState, build_app, serve};
pub use response::{ApiError, Envelope};

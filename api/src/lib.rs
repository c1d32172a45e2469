//! HTTP surface for PhoneBridge
//!
//! Routes, request/response DTOs and the mapping from caller-facing
//! authentication errors to HTTP responses. The binary in `main.rs` wires
//! the infrastructure implementations into [`app::AppState`].

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

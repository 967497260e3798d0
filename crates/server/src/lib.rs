//! HTTP and WebSocket host for the support ticket tracker.

pub mod api;
pub mod metrics;
pub mod state;

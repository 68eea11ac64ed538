//! IO modules - external interfaces
//!
//! This module contains all external IO operations:
//! - `http` - hyper server and routing for visits and submissions
//! - `client_ip` - Client IP and user-agent extraction from requests
//! - `form` - urlencoded form decoding
//! - `pages` - Static HTML responses
//! - `visit_log` - Append-only line stores for qualifying requests
//! - `prometheus` - Prometheus text rendering for GET /metrics

pub mod client_ip;
pub mod form;
pub mod http;
pub mod pages;
pub mod prometheus;
pub mod visit_log;

// Re-export commonly used types
pub use http::{handle_request, serve, start_http_server, AppState};
pub use visit_log::VisitLog;

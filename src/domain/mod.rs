//! Domain models - request-scoped visitor types
//!
//! This module contains the value types passed between classifiers:
//! - `RawVisitorSignal` - IP and user-agent text from one request
//! - `AgentIdentification` - signature table match (or none)
//! - `VisitEvent` - page visit or username submission
//! - `VisitRecord` - final log/skip decision
//! - `SkipReason` - why a request was not logged

pub mod types;

pub use types::{AgentIdentification, RawVisitorSignal, SkipReason, VisitEvent, VisitRecord};

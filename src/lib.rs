//! Visitor gate library
//!
//! Classifies inbound visitors as automated agents or genuine browsers and
//! decides whether a visit or username submission is written to the log
//! stores. Exposes modules for integration testing and binary reuse.

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;

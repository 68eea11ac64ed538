//! Services - visitor classification logic
//!
//! All classifiers are pure and hold no per-request state:
//! - `signatures` - Ordered bot/automation signature table
//! - `browser` - Desktop browser plausibility check
//! - `ip_filter` - Public vs loopback/private address filter
//! - `ua_format` - OS/browser summary for log lines
//! - `classifier` - Combines the above into a log/skip decision

pub mod browser;
pub mod classifier;
pub mod ip_filter;
pub mod signatures;
pub mod ua_format;

// Re-export commonly used types
pub use browser::looks_like_real_browser;
pub use classifier::{classify, VisitClassifier};
pub use ip_filter::is_public_ip;
pub use signatures::{identify, SignatureTable};
pub use ua_format::format_ua;

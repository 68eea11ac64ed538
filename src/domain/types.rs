//! Request-scoped value types for visitor classification

use std::fmt;

/// Raw signals taken from one inbound request
///
/// Both fields may be empty; the classifiers treat emptiness as a value,
/// never as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVisitorSignal {
    pub ip: String,
    pub user_agent: String,
}

impl RawVisitorSignal {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self { ip: ip.into(), user_agent: user_agent.into() }
    }
}

/// Result of matching a user-agent against the signature table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentIdentification<'a> {
    None,
    Identified(&'a str),
}

impl<'a> AgentIdentification<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, AgentIdentification::None)
    }

    pub fn label(&self) -> Option<&'a str> {
        match *self {
            AgentIdentification::None => None,
            AgentIdentification::Identified(label) => Some(label),
        }
    }
}

/// Which kind of request is being classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitEvent {
    /// Initial page load
    Visit,
    /// Form submission carrying a user-supplied username
    Submission { username: String },
}

impl VisitEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitEvent::Visit => "visit",
            VisitEvent::Submission { .. } => "submission",
        }
    }
}

/// Why a request did not qualify for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BotDetected(String),
    NotABrowser,
    PrivateOrInvalidIP,
}

impl SkipReason {
    /// Stable short code used as a metrics/log key
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::BotDetected(_) => "bot_detected",
            SkipReason::NotABrowser => "not_a_browser",
            SkipReason::PrivateOrInvalidIP => "private_or_invalid_ip",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BotDetected(label) => write!(f, "{}", label),
            SkipReason::NotABrowser => f.write_str("Not a real browser"),
            SkipReason::PrivateOrInvalidIP => f.write_str("Private or invalid IP"),
        }
    }
}

/// Final decision for one request
///
/// A line exists only when every classifier agreed the visitor qualifies,
/// so `should_log()` and `formatted_line()` can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitRecord {
    /// Newline-terminated entry destined for the log store
    Log(String),
    Skip(SkipReason),
}

impl VisitRecord {
    pub fn should_log(&self) -> bool {
        matches!(self, VisitRecord::Log(_))
    }

    pub fn formatted_line(&self) -> Option<&str> {
        match self {
            VisitRecord::Log(line) => Some(line.as_str()),
            VisitRecord::Skip(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            VisitRecord::Log(_) => None,
            VisitRecord::Skip(reason) => Some(reason),
        }
    }
}

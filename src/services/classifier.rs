//! Visit classifier - combines the three classifiers into a log/skip decision
//!
//! Pure: the caller owns writing the line and any console notification.

use super::browser::looks_like_real_browser;
use super::ip_filter::{is_public_ip, strip_mapped_prefix};
use super::signatures::SignatureTable;
use super::ua_format::format_ua;
use crate::domain::{AgentIdentification, RawVisitorSignal, SkipReason, VisitEvent, VisitRecord};
use chrono::Local;

/// Human-readable local timestamp layout, e.g. `10/19/2026, 3:04:05 PM`
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Current local time in `TIMESTAMP_FORMAT`
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Stateless classifier holding the read-only signature table
#[derive(Debug, Clone, Default)]
pub struct VisitClassifier {
    signatures: SignatureTable,
}

impl VisitClassifier {
    pub fn new(signatures: SignatureTable) -> Self {
        Self { signatures }
    }

    pub fn signatures(&self) -> &SignatureTable {
        &self.signatures
    }

    /// Classify using the current wall-clock time for the log line
    pub fn classify(&self, signal: &RawVisitorSignal, event: &VisitEvent) -> VisitRecord {
        self.classify_at(signal, event, &now_timestamp())
    }

    /// Classify with an explicit timestamp.
    ///
    /// Skip reasons are checked in order: not a browser, known bot, then
    /// private/invalid IP.
    pub fn classify_at(
        &self,
        signal: &RawVisitorSignal,
        event: &VisitEvent,
        timestamp: &str,
    ) -> VisitRecord {
        let agent = self.signatures.identify(&signal.user_agent);
        let authentic = looks_like_real_browser(&signal.user_agent);
        let public = is_public_ip(&signal.ip);

        if !authentic {
            return VisitRecord::Skip(SkipReason::NotABrowser);
        }
        if let AgentIdentification::Identified(label) = agent {
            return VisitRecord::Skip(SkipReason::BotDetected(label.to_string()));
        }
        if !public {
            return VisitRecord::Skip(SkipReason::PrivateOrInvalidIP);
        }

        let ip = strip_mapped_prefix(&signal.ip);
        let ua_summary = format_ua(&signal.user_agent);
        VisitRecord::Log(format_line(event, ip, &ua_summary, timestamp))
    }
}

/// Classify against the built-in signature table
pub fn classify(signal: &RawVisitorSignal, event: &VisitEvent) -> VisitRecord {
    VisitClassifier::default().classify(signal, event)
}

fn format_line(event: &VisitEvent, ip: &str, ua_summary: &str, timestamp: &str) -> String {
    match event {
        VisitEvent::Visit => format!("{} | {} | {}\n", ip, ua_summary, timestamp),
        VisitEvent::Submission { username } => {
            format!("Discord: {} | IP: {} | {} | {}\n", username, ip, ua_summary, timestamp)
        }
    }
}

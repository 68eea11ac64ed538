//! Prometheus text exposition of classification counters

use crate::infra::metrics::{DecisionSnapshot, Metrics, MetricsSummary};
use std::fmt::Write;

/// Prometheus metric type
enum MetricType {
    Counter,
    Gauge,
}

impl MetricType {
    fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
        }
    }
}

/// Write a simple unlabelled metric (counter or gauge)
fn write_metric(output: &mut String, name: &str, help: &str, typ: MetricType, val: u64) {
    let _ = writeln!(output, "# HELP {name} {help}");
    let _ = writeln!(output, "# TYPE {name} {}", typ.as_str());
    let _ = writeln!(output, "{name} {val}");
}

/// Write one counter family split by event kind and decision
fn write_decisions(output: &mut String, visits: &DecisionSnapshot, submissions: &DecisionSnapshot) {
    let name = "visitor_gate_decisions_total";
    let _ = writeln!(output, "# HELP {name} Classification decisions by event kind and outcome");
    let _ = writeln!(output, "# TYPE {name} counter");
    for (event, snap) in [("visit", visits), ("submission", submissions)] {
        for (decision, val) in [
            ("logged", snap.logged),
            ("bot_detected", snap.skipped_bot),
            ("not_a_browser", snap.skipped_not_browser),
            ("private_or_invalid_ip", snap.skipped_private_ip),
        ] {
            let _ =
                writeln!(output, "{name}{{event=\"{event}\",decision=\"{decision}\"}} {val}");
        }
    }
}

fn format_summary(summary: &MetricsSummary) -> String {
    let mut output = String::with_capacity(1024);

    write_decisions(&mut output, &summary.visits, &summary.submissions);
    write_metric(
        &mut output,
        "visitor_gate_log_write_failures_total",
        "Log store appends that failed",
        MetricType::Counter,
        summary.sink_write_failures,
    );
    write_metric(
        &mut output,
        "visitor_gate_uptime_seconds",
        "Seconds since the service started",
        MetricType::Gauge,
        summary.uptime_secs,
    );

    output
}

/// Format metrics in Prometheus text exposition format
pub fn format_prometheus_metrics(metrics: &Metrics) -> String {
    format_summary(&metrics.report())
}

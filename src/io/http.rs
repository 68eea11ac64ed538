//! HTTP front end: landing page, username submission, health and metrics
//!
//! Uses hyper for the HTTP server. Every request is classified and, when it
//! qualifies, appended to the matching log store. Classification never
//! changes the response a visitor gets.

use super::client_ip::{extract_client_ip, user_agent};
use super::form::submission_username;
use super::pages::{LANDING_PAGE, THANK_YOU_PAGE, USERNAME_FIELD};
use super::prometheus::format_prometheus_metrics;
use super::visit_log::VisitLog;
use crate::domain::{RawVisitorSignal, VisitEvent, VisitRecord};
use crate::infra::{Config, Metrics};
use crate::services::{SignatureTable, VisitClassifier};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Upper bound on a submission body
pub const MAX_FORM_BYTES: usize = 16 * 1024;

/// Shared, read-only state for request handlers
pub struct AppState {
    classifier: VisitClassifier,
    visits: VisitLog,
    submissions: VisitLog,
    metrics: Arc<Metrics>,
    trust_forwarded_for: bool,
    metrics_enabled: bool,
}

impl AppState {
    pub fn from_config(config: &Config, metrics: Arc<Metrics>) -> Self {
        let signatures = SignatureTable::with_extra(
            config.extra_signatures().iter().map(|s| (s.keyword.as_str(), s.label.clone())),
        );
        info!(signatures = %signatures.len(), "signature_table_loaded");

        Self {
            classifier: VisitClassifier::new(signatures),
            visits: VisitLog::new(config.visits_file()),
            submissions: VisitLog::new(config.submissions_file()),
            metrics,
            trust_forwarded_for: config.trust_forwarded_for(),
            metrics_enabled: config.metrics_enabled(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn signal_from<B>(&self, req: &Request<B>, peer: Option<SocketAddr>) -> RawVisitorSignal {
        RawVisitorSignal {
            ip: extract_client_ip(req.headers(), peer, self.trust_forwarded_for),
            user_agent: user_agent(req.headers()),
        }
    }

    /// Classify one request and append its line when it qualifies.
    ///
    /// A failed append is logged and counted; the decision is returned either way.
    pub fn record(&self, signal: &RawVisitorSignal, event: &VisitEvent) -> VisitRecord {
        let record = self.classifier.classify(signal, event);

        match &record {
            VisitRecord::Log(line) => {
                self.metrics.record_logged(event);
                let sink = match event {
                    VisitEvent::Visit => &self.visits,
                    VisitEvent::Submission { .. } => &self.submissions,
                };
                if let Err(e) = sink.append(line) {
                    self.metrics.record_sink_write_failure();
                    error!(
                        file = %sink.path().display(),
                        event = %event.as_str(),
                        error = %e,
                        "visit_log_write_failed"
                    );
                }
                match event {
                    VisitEvent::Visit => {
                        info!(ip = %signal.ip, entry = %line.trim_end(), "visitor_logged")
                    }
                    VisitEvent::Submission { username } => info!(
                        username = %username,
                        ip = %signal.ip,
                        entry = %line.trim_end(),
                        "submission_logged"
                    ),
                }
            }
            VisitRecord::Skip(reason) => {
                self.metrics.record_skipped(event, reason);
                match event {
                    VisitEvent::Visit => info!(
                        ip = %signal.ip,
                        reason = %reason,
                        code = %reason.code(),
                        "visitor_skipped"
                    ),
                    VisitEvent::Submission { .. } => info!(
                        ip = %signal.ip,
                        reason = %reason,
                        code = %reason.code(),
                        "submission_skipped"
                    ),
                }
            }
        }

        record
    }
}

fn html(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .expect("static response should not fail")
}

fn text(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(body.into()))
        .expect("static response should not fail")
}

/// Form body as text, or `None` when it exceeds `MAX_FORM_BYTES`.
///
/// Other read failures yield an empty form.
async fn read_form<B>(body: B) -> Option<String>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, MAX_FORM_BYTES).collect().await {
        Ok(collected) => Some(String::from_utf8_lossy(&collected.to_bytes()).into_owned()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => None,
        Err(e) => {
            debug!(error = %e, "form_body_read_failed");
            Some(String::new())
        }
    }
}

/// Handle HTTP requests
pub async fn handle_request<B>(
    req: Request<B>,
    peer: Option<SocketAddr>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!(method = %method, path = %path, "http_request");

    match (&method, path.as_str()) {
        (&Method::GET, "/") => {
            let signal = state.signal_from(&req, peer);
            state.record(&signal, &VisitEvent::Visit);
            Ok(html(StatusCode::OK, LANDING_PAGE))
        }
        (&Method::POST, "/submit") => {
            let signal = state.signal_from(&req, peer);
            let Some(form) = read_form(req.into_body()).await else {
                return Ok(text(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large"));
            };
            let username = submission_username(&form, USERNAME_FIELD);
            state.record(&signal, &VisitEvent::Submission { username });
            Ok(html(StatusCode::OK, THANK_YOU_PAGE))
        }
        (&Method::GET, "/health") => Ok(text(StatusCode::OK, "ok")),
        (&Method::GET, "/metrics") if state.metrics_enabled => {
            let body = format_prometheus_metrics(&state.metrics);
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "text/plain; version=0.0.4; charset=utf-8")
                .body(Full::new(Bytes::from(body)))
                .expect("static response should not fail"))
        }
        _ => Ok(text(StatusCode::NOT_FOUND, "Not Found")),
    }
}

/// Serve connections from an already bound listener until shutdown
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        let io = TokioIo::new(stream);
                        let state = state.clone();
                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                handle_request(req, Some(addr), state.clone())
                            });
                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, peer = %addr, "http_connection_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "http_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("http_server_shutdown");
                    return Ok(());
                }
            }
        }
    }
}

/// Bind the configured address and serve until shutdown
pub async fn start_http_server(
    config: &Config,
    state: Arc<AppState>,
    shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = format!("{}:{}", config.bind_address(), config.port());
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "http_server_started");
    serve(listener, state, shutdown).await
}

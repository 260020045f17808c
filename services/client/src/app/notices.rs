//! services/client/src/app/notices.rs
//!
//! The seam to the presentation toolkit's notification surface. The core
//! only needs "show the user a notice"; how it renders is not this crate's
//! concern.

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Where user-facing notices go. Implemented by the embedding UI; the
/// default below just logs.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// A sink that reports notices through the tracing subscriber.
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(notice = message),
            Severity::Success => info!(notice = message),
            Severity::Error => warn!(notice = message),
        }
    }
}

/// Convenience for surfacing an unrecoverable page failure.
pub fn report_failure(sink: &dyn NoticeSink, context: &str, detail: &str) {
    error!(context, detail, "page-level failure");
    sink.notify(Severity::Error, &format!("{}: {}", context, detail));
}

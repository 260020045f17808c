//! services/client/src/app/pages/mod.rs
//!
//! Role-scoped page loaders. Each page has a typed model, a loader that
//! issues the page's backend calls (independent calls concurrently,
//! dependent calls sequenced), and the user actions available on it.

pub mod student;
pub mod teacher;

use codelab_core::ports::PortResult;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// The tri-state every page renders from. A failed fetch produces `Error`
/// with no partial content; pages never render half-populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> PageState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready(_))
    }
}

/// Runs a page loader under a cancellation token.
///
/// Returns `None` when the user navigated away before the load finished:
/// the stale result is discarded rather than surfaced. Auth failures have
/// already triggered the global redirect by the time they reach here; the
/// resulting `Error` state is rendered into a page that is about to be
/// replaced, which callers must tolerate.
pub async fn load_page<T, F>(cancel: &CancellationToken, load: F) -> Option<PageState<T>>
where
    F: Future<Output = PortResult<T>>,
{
    tokio::select! {
        _ = cancel.cancelled() => None,
        result = load => Some(match result {
            Ok(model) => PageState::Ready(model),
            Err(e) => PageState::Error(e.to_string()),
        }),
    }
}

//! services/client/src/app/interceptor.rs
//!
//! The global auth-failure policy. Registered once on the HTTP gateway, it
//! observes every response; on 401 or 403 it notifies the user, tears down
//! the session, and force-navigates to the login route. Pages cannot opt
//! out, and their own error handlers still run afterwards with the
//! original error.

use reqwest::StatusCode;
use std::sync::Arc;
use tracing::warn;

use crate::adapters::gateway::ResponseInterceptor;
use crate::app::notices::{NoticeSink, Severity};
use crate::app::routes::NavigationHandle;
use crate::app::session::SessionHandle;

pub const AUTH_FAILURE_NOTICE: &str =
    "You are not authorized to access the page. Please login.";

pub struct AuthRedirect {
    session: SessionHandle,
    nav: NavigationHandle,
    notices: Arc<dyn NoticeSink>,
}

impl AuthRedirect {
    pub fn new(
        session: SessionHandle,
        nav: NavigationHandle,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            session,
            nav,
            notices,
        }
    }
}

impl ResponseInterceptor for AuthRedirect {
    fn on_response(&self, status: StatusCode, path: &str) {
        if status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN {
            return;
        }

        warn!(%status, path, "auth failure intercepted, redirecting to login");
        self.notices.notify(Severity::Error, AUTH_FAILURE_NOTICE);
        self.session.clear();
        self.nav.force_login();
    }
}

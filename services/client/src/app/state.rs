//! services/client/src/app/state.rs
//!
//! Defines the client's shared application state and its wiring.

use codelab_core::ports::{AuthApi, StudentApi, TeacherApi};
use std::sync::Arc;

use crate::adapters::{HttpAuthAdapter, HttpGateway, HttpStudentAdapter, HttpTeacherAdapter};
use crate::app::interceptor::AuthRedirect;
use crate::app::notices::NoticeSink;
use crate::app::routes::NavigationHandle;
use crate::app::session::SessionHandle;
use crate::config::Config;
use crate::error::ClientError;

/// The shared application state, created once at startup and handed to
/// every page loader and action.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthApi>,
    pub students: Arc<dyn StudentApi>,
    pub teachers: Arc<dyn TeacherApi>,
    pub config: Arc<Config>,
    pub session: SessionHandle,
    pub nav: NavigationHandle,
    pub notices: Arc<dyn NoticeSink>,
}

impl AppState {
    /// Builds the whole client: one gateway carrying the auth-failure
    /// interceptor, and the three port adapters sharing it.
    pub fn new(config: Arc<Config>, notices: Arc<dyn NoticeSink>) -> Result<Self, ClientError> {
        let session = SessionHandle::new();
        let nav = NavigationHandle::new();

        let interceptor = Arc::new(AuthRedirect::new(
            session.clone(),
            nav.clone(),
            notices.clone(),
        ));
        let gateway = Arc::new(HttpGateway::new(
            config.api_base_url.clone(),
            vec![interceptor],
        )?);

        Ok(Self {
            auth: Arc::new(HttpAuthAdapter::new(gateway.clone())),
            students: Arc::new(HttpStudentAdapter::new(gateway.clone())),
            teachers: Arc::new(HttpTeacherAdapter::new(gateway)),
            config,
            session,
            nav,
            notices,
        })
    }
}

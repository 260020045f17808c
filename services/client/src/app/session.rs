//! services/client/src/app/session.rs
//!
//! The session lifecycle: the one shared cell holding the resolved
//! identity, and the flows that create and destroy it (login, resolve,
//! register, logout). The cell is initialized on login or a successful
//! "current user" fetch and torn down on logout or any intercepted auth
//! failure.

use codelab_core::domain::{NewUser, UserProfile};
use codelab_core::ports::{PortError, PortResult};
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::app::routes::{home_for, Route};
use crate::app::state::AppState;

//=========================================================================================
// SessionHandle (Shared Across the Whole Client)
//=========================================================================================

/// The process-wide session cell.
///
/// A locally held profile is only ever an optimistic copy; authorization
/// decisions always come from the backend, which is why every protected
/// page re-resolves instead of trusting this cell.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<UserProfile>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    pub fn replace(&self, user: UserProfile) {
        *self.inner.write().expect("session lock poisoned") = Some(user);
    }

    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }

    pub fn current(&self) -> Option<UserProfile> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_some()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================================
// Session Flows
//=========================================================================================

/// Resolves the current session against the backend and refreshes the
/// handle. Idempotent; called at the start of every protected page load so
/// role changes propagate immediately. A 401 is not handled here — it
/// flows through the global interceptor, which redirects.
pub async fn resolve(state: &AppState) -> PortResult<UserProfile> {
    let user = state.auth.current_user().await?;
    state.session.replace(user.clone());
    Ok(user)
}

/// Authenticates, installs the session, and routes to the role's home
/// subtree. Returns the route so the caller can render it.
pub async fn login(state: &AppState, email: &str, password: &str) -> PortResult<Route> {
    let user = state.auth.login(email, password).await?;
    info!(user_id = %user.id, role = ?user.role, "login succeeded");
    let home = home_for(user.role);
    state.session.replace(user);
    state.nav.goto(home.clone());
    Ok(home)
}

/// Registers a new account. Required fields are checked before anything is
/// sent; success routes back to the login page.
pub async fn register(state: &AppState, new_user: &NewUser) -> PortResult<Route> {
    if new_user.first_name.trim().is_empty()
        || new_user.last_name.trim().is_empty()
        || new_user.email.trim().is_empty()
        || new_user.password.is_empty()
    {
        return Err(PortError::Validation(
            "All required fields must be provided".to_string(),
        ));
    }

    state.auth.register(new_user).await?;
    state.nav.goto(Route::Login);
    Ok(Route::Login)
}

/// Ends the backend session, tears down the local one, and returns to the
/// login page.
pub async fn logout(state: &AppState) -> PortResult<()> {
    state.auth.logout().await?;
    state.session.clear();
    state.nav.goto(Route::Login);
    info!("logged out");
    Ok(())
}

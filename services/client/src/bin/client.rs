//! services/client/src/bin/client.rs

use client_lib::{
    app::{
        load_page, notices::{report_failure, TracingNotices}, pages::{student, teacher},
        session, AppState, PageState, Route,
    },
    config::Config,
    error::ClientError,
};
use codelab_core::domain::Role;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Backend at {}", config.api_base_url);

    // --- 2. Build the Shared AppState ---
    let state = AppState::new(config.clone(), Arc::new(TracingNotices))?;

    // --- 3. Walk an Authenticated Session ---
    let (email, password) = match (config.email.as_deref(), config.password.as_deref()) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            info!("CODELAB_EMAIL / CODELAB_PASSWORD not set; nothing to do.");
            return Ok(());
        }
    };

    let home = session::login(&state, email, password).await?;
    let user = state
        .session
        .current()
        .ok_or_else(|| ClientError::Internal("login left no session behind".to_string()))?;
    info!(
        "Logged in as {} ({:?}), routed to {}",
        user.display_name(),
        user.role,
        home.path()
    );

    // Load the role-appropriate home page the way a mounting page would:
    // under a cancellation token, rendering whatever tri-state comes back.
    let cancel = CancellationToken::new();
    match user.role {
        Role::Student => {
            match load_page(&cancel, student::student_home(&state)).await {
                Some(PageState::Ready(page)) => {
                    info!("Joined classes: {}", page.classes.len());
                    for class in &page.classes {
                        info!("  {} - {}", class.id, class.title);
                    }
                }
                Some(PageState::Error(detail)) => {
                    report_failure(state.notices.as_ref(), "student dashboard", &detail)
                }
                Some(PageState::Loading) | None => {}
            }
        }
        Role::Teacher => {
            match load_page(&cancel, teacher::teacher_home(&state)).await {
                Some(PageState::Ready(page)) => {
                    info!("Classes run: {}", page.classes.len());
                    for class in &page.classes {
                        info!("  {} - {}", class.id, class.title);
                    }
                }
                Some(PageState::Error(detail)) => {
                    report_failure(state.notices.as_ref(), "teacher dashboard", &detail)
                }
                Some(PageState::Loading) | None => {}
            }
        }
    }

    // --- 4. Log Out ---
    session::logout(&state).await?;
    debug_assert_eq!(state.nav.current(), Route::Login);
    info!("Session ended.");

    Ok(())
}

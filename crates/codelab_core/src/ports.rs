//! crates/codelab_core/src/ports.rs
//!
//! Defines the service contracts (traits) the client core depends on.
//! These traits form the boundary of the hexagonal architecture: page
//! loaders and session logic talk to the backend only through them, so the
//! core stays independent of the HTTP transport.

use async_trait::async_trait;

use crate::domain::{
    Assignment, ClassroomSummary, CodePayload, NewAssignment, NewClassroom, NewUser, RunOutput,
    Submission, UserProfile,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The variants mirror the error taxonomy every page has to handle:
/// auth failures are globally redirected, validation failures are shown
/// inline, not-found and network failures become page-level states.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// 401: no valid session. Handled globally, never locally.
    #[error("Unauthorized")]
    Unauthorized,
    /// 403: valid session, insufficient permission. Handled globally.
    #[error("Forbidden")]
    Forbidden,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// 400 from the backend, or a required field caught before sending.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Transport failure or a 5xx; manual reload is the recovery path.
    #[error("Network error: {0}")]
    Network(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// True for the statuses the global interceptor redirects on.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, PortError::Unauthorized | PortError::Forbidden)
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Identity and session endpoints, shared by both roles.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticates and establishes the backend session cookie.
    async fn login(&self, email: &str, password: &str) -> PortResult<UserProfile>;

    async fn register(&self, new_user: &NewUser) -> PortResult<()>;

    async fn logout(&self) -> PortResult<()>;

    /// Resolves the currently authenticated user, failing with
    /// `Unauthorized` when no valid session exists.
    async fn current_user(&self) -> PortResult<UserProfile>;

    /// Looks up another user's profile (teachers grading a submission).
    async fn user_by_id(&self, user_id: &str) -> PortResult<UserProfile>;
}

/// Endpoints rooted under `/students`.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn classes(&self) -> PortResult<Vec<ClassroomSummary>>;

    /// Joins a classroom by its class code.
    async fn join_class(&self, class_code: &str) -> PortResult<ClassroomSummary>;

    async fn leave_class(&self, class_id: &str) -> PortResult<()>;

    async fn classroom(&self, class_id: &str) -> PortResult<ClassroomSummary>;

    async fn assignments(&self, class_id: &str) -> PortResult<Vec<Assignment>>;

    async fn assignment(&self, class_id: &str, assignment_id: &str) -> PortResult<Assignment>;

    /// Trial-runs code against the backend executor without submitting.
    async fn run_code(
        &self,
        class_id: &str,
        assignment_id: &str,
        payload: &CodePayload,
    ) -> PortResult<RunOutput>;

    async fn submit(
        &self,
        class_id: &str,
        assignment_id: &str,
        payload: &CodePayload,
    ) -> PortResult<()>;

    /// Fetches one student's submission for an assignment.
    async fn submission(
        &self,
        class_id: &str,
        assignment_id: &str,
        student_id: &str,
    ) -> PortResult<Submission>;
}

/// Endpoints rooted under `/teachers`.
#[async_trait]
pub trait TeacherApi: Send + Sync {
    async fn classes(&self) -> PortResult<Vec<ClassroomSummary>>;

    async fn create_class(&self, new_class: &NewClassroom) -> PortResult<ClassroomSummary>;

    async fn delete_class(&self, class_id: &str) -> PortResult<()>;

    async fn classroom(&self, class_id: &str) -> PortResult<ClassroomSummary>;

    async fn assignments(&self, class_id: &str) -> PortResult<Vec<Assignment>>;

    async fn create_assignment(
        &self,
        class_id: &str,
        new_assignment: &NewAssignment,
    ) -> PortResult<Assignment>;

    async fn delete_assignment(&self, class_id: &str, assignment_id: &str) -> PortResult<()>;

    async fn assignment(&self, class_id: &str, assignment_id: &str) -> PortResult<Assignment>;

    /// Roster of students who have submitted this assignment.
    async fn submitted_students(
        &self,
        class_id: &str,
        assignment_id: &str,
    ) -> PortResult<Vec<UserProfile>>;

    /// Roster of students who have not submitted yet.
    async fn not_submitted_students(
        &self,
        class_id: &str,
        assignment_id: &str,
    ) -> PortResult<Vec<UserProfile>>;

    async fn grade_submission(
        &self,
        class_id: &str,
        assignment_id: &str,
        submission_id: &str,
        marks: u32,
    ) -> PortResult<()>;
}

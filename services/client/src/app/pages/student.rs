//! services/client/src/app/pages/student.rs
//!
//! Loaders and actions for the student subtree.

use codelab_core::domain::{
    Assignment, ClassroomSummary, CodePayload, RunOutput, Submission, UserProfile,
};
use codelab_core::ports::{PortError, PortResult};

use crate::app::session;
use crate::app::state::AppState;

//=========================================================================================
// Page Models
//=========================================================================================

/// The student dashboard: identity plus joined classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentHome {
    pub user: UserProfile,
    pub classes: Vec<ClassroomSummary>,
}

/// One classroom with its assignment list, plus the sidebar data every
/// page carries (identity and the full class list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentClassroom {
    pub user: UserProfile,
    pub classes: Vec<ClassroomSummary>,
    pub classroom: ClassroomSummary,
    pub assignments: Vec<Assignment>,
}

/// The solve view: just the assignment; code lives in the editor widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentWorkbench {
    pub assignment: Assignment,
}

/// The student's own submission report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub user: UserProfile,
    pub assignment: Assignment,
    pub submission: Submission,
}

//=========================================================================================
// Loaders
//=========================================================================================

pub async fn student_home(state: &AppState) -> PortResult<StudentHome> {
    let (user, classes) = tokio::try_join!(session::resolve(state), state.students.classes())?;
    Ok(StudentHome { user, classes })
}

/// Four independent fetches, issued concurrently so page latency is
/// bounded by the slowest call rather than the sum.
pub async fn student_classroom(state: &AppState, class_id: &str) -> PortResult<StudentClassroom> {
    let (user, classes, classroom, assignments) = tokio::try_join!(
        session::resolve(state),
        state.students.classes(),
        state.students.classroom(class_id),
        state.students.assignments(class_id),
    )?;
    Ok(StudentClassroom {
        user,
        classes,
        classroom,
        assignments,
    })
}

pub async fn assignment_workbench(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
) -> PortResult<AssignmentWorkbench> {
    let assignment = state.students.assignment(class_id, assignment_id).await?;
    Ok(AssignmentWorkbench { assignment })
}

/// The submission fetch is keyed by the resolved user id, so it is
/// sequenced after the identity resolves; the assignment fetch is not and
/// runs alongside the resolve.
pub async fn submission_report(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
) -> PortResult<SubmissionReport> {
    let (user, assignment) = tokio::try_join!(
        session::resolve(state),
        state.students.assignment(class_id, assignment_id),
    )?;
    let submission = state
        .students
        .submission(class_id, assignment_id, &user.id)
        .await?;
    Ok(SubmissionReport {
        user,
        assignment,
        submission,
    })
}

//=========================================================================================
// Actions
//=========================================================================================

/// Joins a classroom by code. An empty code is rejected before anything is
/// sent.
pub async fn join_class(state: &AppState, class_code: &str) -> PortResult<ClassroomSummary> {
    if class_code.trim().is_empty() {
        return Err(PortError::Validation(
            "Class Code cannot be empty.".to_string(),
        ));
    }
    state.students.join_class(class_code.trim()).await
}

pub async fn leave_class(state: &AppState, class_id: &str) -> PortResult<()> {
    state.students.leave_class(class_id).await
}

/// Trial-runs the editor contents against the backend executor.
pub async fn run_code(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
    payload: &CodePayload,
) -> PortResult<RunOutput> {
    state
        .students
        .run_code(class_id, assignment_id, payload)
        .await
}

/// Submits the solution. Deliberately no client-side check on the code
/// field: an empty submission is the backend's call to accept or reject.
pub async fn submit_solution(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
    payload: &CodePayload,
) -> PortResult<()> {
    state.students.submit(class_id, assignment_id, payload).await
}

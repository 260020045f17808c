//! services/client/src/app/pages/teacher.rs
//!
//! Loaders and actions for the teacher subtree.

use chrono::{DateTime, Utc};
use codelab_core::domain::{
    Assignment, ClassroomSummary, NewAssignment, NewClassroom, Submission, UserProfile,
};
use codelab_core::ports::{PortError, PortResult};

use crate::app::session;
use crate::app::state::AppState;

//=========================================================================================
// Page Models
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherHome {
    pub user: UserProfile,
    pub classes: Vec<ClassroomSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherClassroom {
    pub user: UserProfile,
    pub classes: Vec<ClassroomSummary>,
    pub classroom: ClassroomSummary,
    pub assignments: Vec<Assignment>,
}

/// One assignment with its submitted / not-submitted rosters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherAssignment {
    pub user: UserProfile,
    pub classes: Vec<ClassroomSummary>,
    pub classroom: ClassroomSummary,
    pub assignment: Assignment,
    pub submitted: Vec<UserProfile>,
    pub not_submitted: Vec<UserProfile>,
}

/// One student's submission, ready for grading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingReport {
    pub student: UserProfile,
    pub assignment: Assignment,
    pub submission: Submission,
}

//=========================================================================================
// Loaders
//=========================================================================================

pub async fn teacher_home(state: &AppState) -> PortResult<TeacherHome> {
    let (user, classes) = tokio::try_join!(session::resolve(state), state.teachers.classes())?;
    Ok(TeacherHome { user, classes })
}

pub async fn teacher_classroom(state: &AppState, class_id: &str) -> PortResult<TeacherClassroom> {
    let (user, classes, classroom, assignments) = tokio::try_join!(
        session::resolve(state),
        state.teachers.classes(),
        state.teachers.classroom(class_id),
        state.teachers.assignments(class_id),
    )?;
    Ok(TeacherClassroom {
        user,
        classes,
        classroom,
        assignments,
    })
}

/// Six independent fetches; none depends on another's result, so all run
/// concurrently.
pub async fn teacher_assignment(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
) -> PortResult<TeacherAssignment> {
    let (user, classes, classroom, assignment, submitted, not_submitted) = tokio::try_join!(
        session::resolve(state),
        state.teachers.classes(),
        state.teachers.classroom(class_id),
        state.teachers.assignment(class_id, assignment_id),
        state.teachers.submitted_students(class_id, assignment_id),
        state.teachers.not_submitted_students(class_id, assignment_id),
    )?;
    Ok(TeacherAssignment {
        user,
        classes,
        classroom,
        assignment,
        submitted,
        not_submitted,
    })
}

/// The student id comes from the route, not from a prior fetch, so all
/// three calls are independent and run concurrently.
pub async fn grading_report(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
    student_id: &str,
) -> PortResult<GradingReport> {
    let (student, assignment, submission) = tokio::try_join!(
        state.auth.user_by_id(student_id),
        state.teachers.assignment(class_id, assignment_id),
        state
            .students
            .submission(class_id, assignment_id, student_id),
    )?;
    Ok(GradingReport {
        student,
        assignment,
        submission,
    })
}

//=========================================================================================
// Actions
//=========================================================================================

/// Creates a classroom. Title and description are required client-side.
pub async fn create_class(
    state: &AppState,
    title: &str,
    description: &str,
    color: &str,
) -> PortResult<ClassroomSummary> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(PortError::Validation(
            "Classroom Title and Description cannot be empty.".to_string(),
        ));
    }
    state
        .teachers
        .create_class(&NewClassroom {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            color: color.to_string(),
        })
        .await
}

pub async fn delete_class(state: &AppState, class_id: &str) -> PortResult<()> {
    state.teachers.delete_class(class_id).await
}

/// Posts an assignment. Title and description are required client-side;
/// the deadline is typed and therefore always present.
pub async fn create_assignment(
    state: &AppState,
    class_id: &str,
    title: &str,
    description: &str,
    deadline: DateTime<Utc>,
    example_input: &str,
    example_output: &str,
) -> PortResult<Assignment> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(PortError::Validation(
            "Title, Description, and Deadline are required.".to_string(),
        ));
    }
    state
        .teachers
        .create_assignment(
            class_id,
            &NewAssignment {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                deadline,
                example_input: example_input.to_string(),
                example_output: example_output.to_string(),
            },
        )
        .await
}

pub async fn delete_assignment(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
) -> PortResult<()> {
    state.teachers.delete_assignment(class_id, assignment_id).await
}

/// Grades a submission. The marks field arrives as the raw text the
/// teacher typed; empty or non-numeric input is rejected before sending.
pub async fn submit_marks(
    state: &AppState,
    class_id: &str,
    assignment_id: &str,
    submission_id: &str,
    marks_field: &str,
) -> PortResult<()> {
    let trimmed = marks_field.trim();
    if trimmed.is_empty() {
        return Err(PortError::Validation("Please enter marks".to_string()));
    }
    let marks: u32 = trimmed
        .parse()
        .map_err(|_| PortError::Validation(format!("'{}' is not a valid mark", trimmed)))?;

    state
        .teachers
        .grade_submission(class_id, assignment_id, submission_id, marks)
        .await
}

#[cfg(test)]
mod tests {
    // Validation of the marks field is pure string handling; exercise it
    // without a backend.
    use super::*;
    use crate::app::notices::TracingNotices;
    use crate::app::state::AppState;
    use crate::config::Config;
    use std::sync::Arc;

    fn offline_state() -> AppState {
        // Points at a closed port; validation must fail before any request.
        AppState::new(
            Arc::new(Config::for_base_url("http://127.0.0.1:9")),
            Arc::new(TracingNotices),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn empty_marks_are_rejected_client_side() {
        let state = offline_state();
        let err = submit_marks(&state, "c1", "a1", "s1", "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Validation(_)));
    }

    #[tokio::test]
    async fn non_numeric_marks_are_rejected_client_side() {
        let state = offline_state();
        let err = submit_marks(&state, "c1", "a1", "s1", "ten")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_class_form_is_rejected_client_side() {
        let state = offline_state();
        let err = create_class(&state, "", "desc", "#fff").await.unwrap_err();
        assert!(matches!(err, PortError::Validation(_)));
    }
}

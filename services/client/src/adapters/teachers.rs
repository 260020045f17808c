//! services/client/src/adapters/teachers.rs
//!
//! Concrete implementation of the `TeacherApi` port over the HTTP gateway.
//! All paths live under `/api/v1/teachers`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codelab_core::domain::{Assignment, ClassroomSummary, NewAssignment, NewClassroom, UserProfile};
use codelab_core::ports::{PortResult, TeacherApi};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::auth::UserWire;
use crate::adapters::gateway::HttpGateway;
use crate::adapters::students::{AssignmentWire, ClassroomWire};

/// A teacher-side adapter that implements the `TeacherApi` port.
#[derive(Clone)]
pub struct HttpTeacherAdapter {
    gateway: Arc<HttpGateway>,
}

impl HttpTeacherAdapter {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }
}

//=========================================================================================
// "Impure" Wire Structs
//=========================================================================================

#[derive(Deserialize)]
struct ClassesData {
    classes: Vec<ClassroomWire>,
}

#[derive(Deserialize)]
struct ClassroomData {
    classroom: ClassroomWire,
}

#[derive(Deserialize)]
struct AssignmentListData {
    assignments: Vec<AssignmentWire>,
}

/// The create-assignment endpoint returns the single created record under
/// the (plural) `assignments` key.
#[derive(Deserialize)]
struct CreatedAssignmentData {
    assignments: AssignmentWire,
}

#[derive(Deserialize)]
struct AssignmentData {
    assignment: AssignmentWire,
}

#[derive(Deserialize)]
struct StudentsData {
    students: Vec<UserWire>,
}

#[derive(Serialize)]
struct NewClassBody<'a> {
    title: &'a str,
    description: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct NewAssignmentBody<'a> {
    title: &'a str,
    description: &'a str,
    deadline: DateTime<Utc>,
    #[serde(rename = "exampleInput")]
    example_input: &'a str,
    #[serde(rename = "exampleOutput")]
    example_output: &'a str,
}

#[derive(Serialize)]
struct MarksBody {
    marks: u32,
}

//=========================================================================================
// `TeacherApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl TeacherApi for HttpTeacherAdapter {
    async fn classes(&self) -> PortResult<Vec<ClassroomSummary>> {
        let data: ClassesData = self.gateway.get("/api/v1/teachers/classes").await?;
        Ok(data.classes.into_iter().map(|w| w.to_domain()).collect())
    }

    async fn create_class(&self, new_class: &NewClassroom) -> PortResult<ClassroomSummary> {
        let data: ClassroomData = self
            .gateway
            .post(
                "/api/v1/teachers/classes",
                &NewClassBody {
                    title: &new_class.title,
                    description: &new_class.description,
                    color: &new_class.color,
                },
            )
            .await?;
        Ok(data.classroom.to_domain())
    }

    async fn delete_class(&self, class_id: &str) -> PortResult<()> {
        self.gateway
            .post_empty(&format!("/api/v1/teachers/classes/{}/delete", class_id))
            .await
    }

    async fn classroom(&self, class_id: &str) -> PortResult<ClassroomSummary> {
        let data: ClassroomData = self
            .gateway
            .get(&format!("/api/v1/teachers/classes/{}", class_id))
            .await?;
        Ok(data.classroom.to_domain())
    }

    async fn assignments(&self, class_id: &str) -> PortResult<Vec<Assignment>> {
        let data: AssignmentListData = self
            .gateway
            .get(&format!("/api/v1/teachers/classes/{}/assignments", class_id))
            .await?;
        Ok(data.assignments.into_iter().map(|w| w.to_domain()).collect())
    }

    async fn create_assignment(
        &self,
        class_id: &str,
        new_assignment: &NewAssignment,
    ) -> PortResult<Assignment> {
        let data: CreatedAssignmentData = self
            .gateway
            .post(
                &format!("/api/v1/teachers/classes/{}/assignments", class_id),
                &NewAssignmentBody {
                    title: &new_assignment.title,
                    description: &new_assignment.description,
                    deadline: new_assignment.deadline,
                    example_input: &new_assignment.example_input,
                    example_output: &new_assignment.example_output,
                },
            )
            .await?;
        Ok(data.assignments.to_domain())
    }

    async fn delete_assignment(&self, class_id: &str, assignment_id: &str) -> PortResult<()> {
        self.gateway
            .post_empty(&format!(
                "/api/v1/teachers/classes/{}/assignments/{}/delete",
                class_id, assignment_id
            ))
            .await
    }

    async fn assignment(&self, class_id: &str, assignment_id: &str) -> PortResult<Assignment> {
        let data: AssignmentData = self
            .gateway
            .get(&format!(
                "/api/v1/teachers/classes/{}/assignments/{}",
                class_id, assignment_id
            ))
            .await?;
        Ok(data.assignment.to_domain())
    }

    async fn submitted_students(
        &self,
        class_id: &str,
        assignment_id: &str,
    ) -> PortResult<Vec<UserProfile>> {
        let data: StudentsData = self
            .gateway
            .get(&format!(
                "/api/v1/teachers/classes/{}/assignments/{}/students",
                class_id, assignment_id
            ))
            .await?;
        Ok(data.students.into_iter().map(|w| w.to_domain()).collect())
    }

    async fn not_submitted_students(
        &self,
        class_id: &str,
        assignment_id: &str,
    ) -> PortResult<Vec<UserProfile>> {
        let data: StudentsData = self
            .gateway
            .get(&format!(
                "/api/v1/teachers/classes/{}/assignments/{}/notSubmittedStudents",
                class_id, assignment_id
            ))
            .await?;
        Ok(data.students.into_iter().map(|w| w.to_domain()).collect())
    }

    async fn grade_submission(
        &self,
        class_id: &str,
        assignment_id: &str,
        submission_id: &str,
        marks: u32,
    ) -> PortResult<()> {
        self.gateway
            .post_unit(
                &format!(
                    "/api/v1/teachers/classes/{}/assignments/{}/submissions/{}/marks",
                    class_id, assignment_id, submission_id
                ),
                &MarksBody { marks },
            )
            .await
    }
}

//! services/client/src/adapters/students.rs
//!
//! Concrete implementation of the `StudentApi` port over the HTTP gateway.
//! All paths live under `/api/v1/students`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codelab_core::domain::{
    Assignment, ClassroomSummary, CodePayload, Example, Language, RunOutput, Submission,
};
use codelab_core::ports::{PortResult, StudentApi};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::gateway::HttpGateway;

/// A student-side adapter that implements the `StudentApi` port.
#[derive(Clone)]
pub struct HttpStudentAdapter {
    gateway: Arc<HttpGateway>,
}

impl HttpStudentAdapter {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }
}

//=========================================================================================
// "Impure" Wire Structs
//=========================================================================================

#[derive(Deserialize)]
pub(crate) struct ClassroomWire {
    #[serde(rename = "classroomId")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub teacher: Option<String>,
}

impl ClassroomWire {
    pub(crate) fn to_domain(self) -> ClassroomSummary {
        ClassroomSummary {
            id: self.id,
            title: self.title,
            description: self.description,
            color: self.color,
            teacher: self.teacher,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct AssignmentWire {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub example: Option<ExampleWire>,
}

#[derive(Deserialize)]
pub(crate) struct ExampleWire {
    pub input: String,
    pub output: String,
}

impl AssignmentWire {
    pub(crate) fn to_domain(self) -> Assignment {
        Assignment {
            id: self.id,
            title: self.title,
            description: self.description,
            deadline: self.deadline,
            example: self.example.map(|e| Example {
                input: e.input,
                output: e.output,
            }),
        }
    }
}

/// The backend nests the code fields one level down and keeps `marks`
/// beside them; the domain `Submission` is flat.
#[derive(Deserialize)]
struct SubmissionWire {
    #[serde(rename = "_id")]
    id: String,
    submission: SubmissionBodyWire,
    #[serde(default)]
    marks: Option<u32>,
}

#[derive(Deserialize)]
struct SubmissionBodyWire {
    code: String,
    language: Language,
    #[serde(default)]
    input: String,
    #[serde(default)]
    output: String,
}

impl SubmissionWire {
    fn to_domain(self) -> Submission {
        Submission {
            id: self.id,
            code: self.submission.code,
            language: self.submission.language,
            input: self.submission.input,
            output: self.submission.output,
            marks: self.marks,
        }
    }
}

#[derive(Deserialize)]
struct ClassroomData {
    classroom: ClassroomWire,
}

#[derive(Deserialize)]
struct AssignmentsData {
    assignments: Vec<AssignmentWire>,
}

#[derive(Deserialize)]
struct AssignmentData {
    assignment: AssignmentWire,
}

#[derive(Deserialize)]
struct SubmissionData {
    submission: SubmissionWire,
}

#[derive(Deserialize)]
struct RunOutputData {
    output: String,
}

#[derive(Serialize)]
struct JoinBody<'a> {
    #[serde(rename = "classroomId")]
    classroom_id: &'a str,
}

#[derive(Serialize)]
struct CodeBody<'a> {
    language: Language,
    code: &'a str,
    input: &'a str,
}

impl<'a> CodeBody<'a> {
    fn from_payload(payload: &'a CodePayload) -> Self {
        Self {
            language: payload.language,
            code: &payload.code,
            input: &payload.input,
        }
    }
}

//=========================================================================================
// `StudentApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl StudentApi for HttpStudentAdapter {
    async fn classes(&self) -> PortResult<Vec<ClassroomSummary>> {
        // The student list is the one endpoint whose data is a bare array.
        let wires: Vec<ClassroomWire> = self.gateway.get("/api/v1/students/classes").await?;
        Ok(wires.into_iter().map(|w| w.to_domain()).collect())
    }

    async fn join_class(&self, class_code: &str) -> PortResult<ClassroomSummary> {
        let wire: ClassroomWire = self
            .gateway
            .post(
                "/api/v1/students/join",
                &JoinBody {
                    classroom_id: class_code,
                },
            )
            .await?;
        Ok(wire.to_domain())
    }

    async fn leave_class(&self, class_id: &str) -> PortResult<()> {
        self.gateway
            .post_empty(&format!("/api/v1/students/classes/{}/delete", class_id))
            .await
    }

    async fn classroom(&self, class_id: &str) -> PortResult<ClassroomSummary> {
        let data: ClassroomData = self
            .gateway
            .get(&format!("/api/v1/students/classes/{}", class_id))
            .await?;
        Ok(data.classroom.to_domain())
    }

    async fn assignments(&self, class_id: &str) -> PortResult<Vec<Assignment>> {
        let data: AssignmentsData = self
            .gateway
            .get(&format!("/api/v1/students/classes/{}/assignments", class_id))
            .await?;
        Ok(data.assignments.into_iter().map(|w| w.to_domain()).collect())
    }

    async fn assignment(&self, class_id: &str, assignment_id: &str) -> PortResult<Assignment> {
        let data: AssignmentData = self
            .gateway
            .get(&format!(
                "/api/v1/students/classes/{}/assignments/{}",
                class_id, assignment_id
            ))
            .await?;
        Ok(data.assignment.to_domain())
    }

    async fn run_code(
        &self,
        class_id: &str,
        assignment_id: &str,
        payload: &CodePayload,
    ) -> PortResult<RunOutput> {
        let data: RunOutputData = self
            .gateway
            .post(
                &format!(
                    "/api/v1/students/classes/{}/assignments/{}/run-code",
                    class_id, assignment_id
                ),
                &CodeBody::from_payload(payload),
            )
            .await?;
        Ok(RunOutput {
            output: data.output,
        })
    }

    async fn submit(
        &self,
        class_id: &str,
        assignment_id: &str,
        payload: &CodePayload,
    ) -> PortResult<()> {
        self.gateway
            .post_unit(
                &format!(
                    "/api/v1/students/classes/{}/assignments/{}/submit",
                    class_id, assignment_id
                ),
                &CodeBody::from_payload(payload),
            )
            .await
    }

    async fn submission(
        &self,
        class_id: &str,
        assignment_id: &str,
        student_id: &str,
    ) -> PortResult<Submission> {
        let data: SubmissionData = self
            .gateway
            .get(&format!(
                "/api/v1/students/classes/{}/assignments/{}/submissions/{}",
                class_id, assignment_id, student_id
            ))
            .await?;
        Ok(data.submission.to_domain())
    }
}

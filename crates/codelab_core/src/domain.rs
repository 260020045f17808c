//! crates/codelab_core/src/domain.rs
//!
//! Defines the pure, core data structures for the classroom client.
//! These structs are independent of the wire format; the HTTP adapters own
//! the backend's exact payload shapes and convert into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two sides of the classroom: every authenticated user is exactly one.
///
/// A role is authoritative only as reported by the backend's "current user"
/// endpoint. A locally remembered role may pick which route subtree to open
/// optimistically, but never grants access by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

/// The resolved identity of an authenticated user.
///
/// `prn` and `roll_no` are student-only registration numbers; teachers carry
/// neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub prn: Option<String>,
    pub roll_no: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A classroom as listed on a dashboard.
///
/// `teacher` is filled on the student side (students see who runs the class)
/// and absent on the teacher side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassroomSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub color: String,
    pub teacher: Option<String>,
}

/// A coding assignment posted to a classroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub example: Option<Example>,
}

/// An optional worked example shown alongside an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: String,
    pub output: String,
}

/// A student's submitted solution. `marks` stays `None` until a teacher
/// grades it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    pub code: String,
    pub language: Language,
    pub input: String,
    pub output: String,
    pub marks: Option<u32>,
}

/// Languages the code-editor widget and the backend runner both understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    Cpp,
}

impl Language {
    /// The starter snippet the editor is seeded with when this language is
    /// selected.
    pub fn starter_code(&self) -> &'static str {
        match self {
            Language::Java => {
                "public class Main {\n\tpublic static void main(String[] args) {\n\t\tSystem.out.println(\"Hello, World!\");\n\t}\n}"
            }
            Language::Python => "print(\"Hello, World!\")",
            Language::Cpp => {
                "#include <iostream>\nusing namespace std;\n\nint main() {\n\tcout << \"Hello, World!\";\n\treturn 0;\n}"
            }
        }
    }
}

/// Registration payload. `prn`/`roll_no` apply to students only.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub prn: Option<String>,
    pub roll_no: Option<String>,
}

/// Payload for a teacher creating a classroom.
#[derive(Debug, Clone)]
pub struct NewClassroom {
    pub title: String,
    pub description: String,
    pub color: String,
}

/// Payload for a teacher posting an assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub example_input: String,
    pub example_output: String,
}

/// Code plus stdin, as sent to both "run" and "submit".
#[derive(Debug, Clone)]
pub struct CodePayload {
    pub language: Language,
    pub code: String,
    pub input: String,
}

/// What the backend runner printed for a trial execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub output: String,
}

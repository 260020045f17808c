pub mod domain;
pub mod ports;

pub use domain::{
    Assignment, ClassroomSummary, CodePayload, Example, Language, NewAssignment, NewClassroom,
    NewUser, Role, RunOutput, Submission, UserProfile,
};
pub use ports::{AuthApi, PortError, PortResult, StudentApi, TeacherApi};

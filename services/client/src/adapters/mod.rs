pub mod auth;
pub mod gateway;
pub mod students;
pub mod teachers;

pub use auth::HttpAuthAdapter;
pub use gateway::{Envelope, HttpGateway, ResponseInterceptor};
pub use students::HttpStudentAdapter;
pub use teachers::HttpTeacherAdapter;

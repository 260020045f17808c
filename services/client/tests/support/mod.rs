//! In-process mock of the classroom backend.
//!
//! Bound to an ephemeral port; serves the envelope-wrapped fixtures the
//! client expects, tracks request arrival order, and can be told to fail
//! specific paths or to gate a pair of paths on each other (for proving
//! that independent fetches really run concurrently).

use axum::{
    extract::{Json, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

pub const STUDENT_ID: &str = "u-stu-1";
pub const TEACHER_ID: &str = "u-tea-1";
pub const CLASS_ID: &str = "c1";
pub const ASSIGNMENT_ID: &str = "a1";
pub const SUBMISSION_ID: &str = "s1";

#[derive(Clone, Default)]
struct BackendState {
    /// Request paths in arrival order.
    requests: Arc<Mutex<Vec<String>>>,
    /// (path substring, status) pairs forcing a failure response.
    overrides: Arc<Mutex<Vec<(String, u16)>>>,
    /// Paths that must rendezvous: each gated request waits until all
    /// gated paths have at least one request in flight.
    gate_paths: Arc<Mutex<Vec<String>>>,
    gate_arrived: Arc<Mutex<usize>>,
    gate_notify: Arc<Notify>,
    /// The last (submission_id, marks) a teacher posted.
    graded: Arc<Mutex<Option<(String, u32)>>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: BackendState,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = BackendState::default();

        let app = Router::new()
            .route("/api/v1/users/login", post(login))
            .route("/api/v1/users/register", post(register))
            .route("/api/v1/users/logout", post(ok_empty))
            .route("/api/v1/users/me", get(me))
            .route("/api/v1/users/{id}", get(user_by_id))
            .route("/api/v1/students/classes", get(student_classes))
            .route("/api/v1/students/join", post(join_class))
            .route("/api/v1/students/classes/{id}", get(student_classroom))
            .route(
                "/api/v1/students/classes/{id}/assignments",
                get(assignments),
            )
            .route(
                "/api/v1/students/classes/{id}/assignments/{aid}",
                get(assignment),
            )
            .route(
                "/api/v1/students/classes/{id}/assignments/{aid}/run-code",
                post(run_code),
            )
            .route(
                "/api/v1/students/classes/{id}/assignments/{aid}/submit",
                post(ok_empty),
            )
            .route(
                "/api/v1/students/classes/{id}/assignments/{aid}/submissions/{sid}",
                get(submission),
            )
            .route("/api/v1/teachers/classes", get(teacher_classes).post(create_class))
            .route("/api/v1/teachers/classes/{id}", get(teacher_classroom))
            .route(
                "/api/v1/teachers/classes/{id}/assignments",
                get(assignments),
            )
            .route(
                "/api/v1/teachers/classes/{id}/assignments/{aid}",
                get(assignment),
            )
            .route(
                "/api/v1/teachers/classes/{id}/assignments/{aid}/students",
                get(submitted_students),
            )
            .route(
                "/api/v1/teachers/classes/{id}/assignments/{aid}/notSubmittedStudents",
                get(not_submitted_students),
            )
            .route(
                "/api/v1/teachers/classes/{id}/assignments/{aid}/submissions/{sid}/marks",
                post(grade),
            )
            .layer(middleware::from_fn_with_state(state.clone(), track))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    /// Force every request whose path contains `fragment` to answer with
    /// `status` and a failure envelope.
    pub fn fail_matching(&self, fragment: &str, status: u16) {
        self.state
            .overrides
            .lock()
            .unwrap()
            .push((fragment.to_string(), status));
    }

    /// Make the given paths wait for each other: a request to either only
    /// completes once both have arrived. Sequential callers deadlock into
    /// a 500 after the gate times out.
    pub fn gate_on_each_other(&self, paths: [&str; 2]) {
        let mut gate = self.state.gate_paths.lock().unwrap();
        gate.extend(paths.iter().map(|p| p.to_string()));
    }

    pub fn request_log(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_graded(&self) -> Option<(String, u32)> {
        self.state.graded.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//=========================================================================================
// Middleware: request tracking, forced failures, gating, cookie auth
//=========================================================================================

async fn track(State(state): State<BackendState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    state.requests.lock().unwrap().push(path.clone());

    if let Some(status) = forced_status(&state, &path) {
        return failure(status, "forced failure");
    }

    if is_protected(&path) && role_from_cookie(&req).is_none() {
        return failure(StatusCode::UNAUTHORIZED, "no session");
    }

    if is_gated(&state, &path) && !rendezvous(&state).await {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "gate timed out");
    }

    next.run(req).await
}

fn forced_status(state: &BackendState, path: &str) -> Option<StatusCode> {
    let overrides = state.overrides.lock().unwrap();
    overrides
        .iter()
        .find(|(fragment, _)| path.contains(fragment.as_str()))
        .and_then(|(_, code)| StatusCode::from_u16(*code).ok())
}

fn is_protected(path: &str) -> bool {
    let open = [
        "/api/v1/users/login",
        "/api/v1/users/register",
        "/api/v1/users/logout",
    ];
    path.starts_with("/api/v1/") && !open.contains(&path)
}

fn role_from_cookie(req: &Request) -> Option<String> {
    let cookies = req.headers().get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|c| {
        c.trim()
            .strip_prefix("session=")
            .map(|role| role.to_string())
    })
}

fn is_gated(state: &BackendState, path: &str) -> bool {
    state
        .gate_paths
        .lock()
        .unwrap()
        .iter()
        .any(|p| p == path)
}

/// Waits until every gated path has a request in flight, or gives up.
async fn rendezvous(state: &BackendState) -> bool {
    let expected = state.gate_paths.lock().unwrap().len();
    {
        let mut arrived = state.gate_arrived.lock().unwrap();
        *arrived += 1;
    }
    state.gate_notify.notify_waiters();

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let notified = state.gate_notify.notified();
        if *state.gate_arrived.lock().unwrap() >= expected {
            return true;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        if tokio::time::timeout(remaining, notified).await.is_err() {
            return false;
        }
    }
}

//=========================================================================================
// Fixtures
//=========================================================================================

fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "status": "success", "data": data }))
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "status": "fail", "message": message })),
    )
        .into_response()
}

fn student_user() -> Value {
    json!({
        "_id": STUDENT_ID,
        "firstName": "Asha",
        "lastName": "Verma",
        "email": "student@example.com",
        "role": "student",
        "prn": "PRN2024001",
        "rollNo": "17"
    })
}

fn teacher_user() -> Value {
    json!({
        "_id": TEACHER_ID,
        "firstName": "Ravi",
        "lastName": "Iyer",
        "email": "teacher@example.com",
        "role": "teacher"
    })
}

fn classroom() -> Value {
    json!({
        "classroomId": CLASS_ID,
        "title": "Systems Lab",
        "description": "Weekly coding drills",
        "color": "linear-gradient(135deg, #607d8b, #455a64)",
        "teacher": "Ravi Iyer"
    })
}

fn assignment_json() -> Value {
    json!({
        "_id": ASSIGNMENT_ID,
        "title": "FizzBuzz",
        "description": "The classic warm-up",
        "deadline": "2026-09-15T00:00:00Z",
        "example": { "input": "3", "output": "Fizz" }
    })
}

fn submission_json() -> Value {
    json!({
        "_id": SUBMISSION_ID,
        "submission": {
            "code": "print(1)",
            "language": "python",
            "input": "",
            "output": "1"
        },
        "marks": null
    })
}

//=========================================================================================
// Handlers
//=========================================================================================

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if password == "wrong" || password.is_empty() {
        return failure(StatusCode::UNAUTHORIZED, "invalid credentials");
    }

    let (role, user) = if email.contains("teacher") {
        ("teacher", teacher_user())
    } else {
        ("student", student_user())
    };
    let cookie = format!("session={}; Path=/", role);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        envelope(json!({ "user": user })),
    )
        .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"].as_str().unwrap_or_default().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "email required");
    }
    (StatusCode::CREATED, envelope(json!({}))).into_response()
}

async fn ok_empty() -> Json<Value> {
    envelope(json!({}))
}

async fn me(req: Request) -> Response {
    match role_from_cookie(&req).as_deref() {
        Some("teacher") => envelope(json!({ "user": teacher_user() })).into_response(),
        Some(_) => envelope(json!({ "user": student_user() })).into_response(),
        None => failure(StatusCode::UNAUTHORIZED, "no session"),
    }
}

async fn user_by_id() -> Json<Value> {
    envelope(json!({ "user": student_user() }))
}

async fn student_classes() -> Json<Value> {
    envelope(json!([classroom()]))
}

async fn join_class(Json(body): Json<Value>) -> Response {
    if body["classroomId"].as_str() == Some(CLASS_ID) {
        envelope(classroom()).into_response()
    } else {
        failure(StatusCode::BAD_REQUEST, "bad class code")
    }
}

async fn student_classroom() -> Json<Value> {
    envelope(json!({ "classroom": classroom() }))
}

async fn assignments() -> Json<Value> {
    envelope(json!({ "assignments": [assignment_json()] }))
}

async fn assignment() -> Json<Value> {
    envelope(json!({ "assignment": assignment_json() }))
}

async fn run_code() -> Json<Value> {
    envelope(json!({ "output": "1" }))
}

async fn submission() -> Json<Value> {
    envelope(json!({ "submission": submission_json() }))
}

async fn teacher_classes() -> Json<Value> {
    envelope(json!({ "classes": [classroom()] }))
}

async fn create_class(Json(body): Json<Value>) -> Response {
    if body["title"].as_str().unwrap_or_default().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "title required");
    }
    (
        StatusCode::CREATED,
        envelope(json!({ "classroom": classroom() })),
    )
        .into_response()
}

async fn teacher_classroom() -> Json<Value> {
    envelope(json!({ "classroom": classroom() }))
}

async fn submitted_students() -> Json<Value> {
    envelope(json!({ "students": [student_user()] }))
}

async fn not_submitted_students() -> Json<Value> {
    envelope(json!({ "students": [] }))
}

async fn grade(
    State(state): State<BackendState>,
    axum::extract::Path((_, _, sid)): axum::extract::Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let marks = match body["marks"].as_u64() {
        Some(m) => m as u32,
        None => return failure(StatusCode::BAD_REQUEST, "marks required"),
    };
    *state.graded.lock().unwrap() = Some((sid, marks));
    envelope(json!({})).into_response()
}

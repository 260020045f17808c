//! services/client/src/app/routes.rs
//!
//! The route table and the shared navigation state. Routes partition into
//! the anonymous pair (login/register) and two disjoint subtrees, one per
//! role. The client picks which subtree to enter after login; it does not
//! enforce roles beyond that — a role-mismatched backend call fails with
//! 403 and the global interceptor handles it.

use codelab_core::domain::Role;
use std::sync::{Arc, RwLock};

//=========================================================================================
// The Route Table
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    StudentHome,
    StudentClassroom {
        class_id: String,
    },
    /// The solve view: assignment text plus the code editor.
    AssignmentSolve {
        class_id: String,
        assignment_id: String,
    },
    /// The student's own submission report.
    AssignmentView {
        class_id: String,
        assignment_id: String,
    },
    TeacherHome,
    TeacherClassroom {
        class_id: String,
    },
    TeacherAssignment {
        class_id: String,
        assignment_id: String,
    },
    /// A teacher reviewing (and grading) one student's submission.
    GradingView {
        class_id: String,
        assignment_id: String,
        student_id: String,
    },
}

impl Route {
    /// Parses a browser-style path. Missing or empty parameters yield
    /// `None`; the page renders an error state instead of crashing.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            // The index and the old tour link both land on the login page.
            [] | ["login"] | ["tour"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["students"] => Some(Route::StudentHome),
            ["students", "classes", id] => Some(Route::StudentClassroom {
                class_id: (*id).to_string(),
            }),
            ["students", "classes", id, "assignments", aid, "solve"] => {
                Some(Route::AssignmentSolve {
                    class_id: (*id).to_string(),
                    assignment_id: (*aid).to_string(),
                })
            }
            ["students", "classes", id, "assignments", aid, "view"] => {
                Some(Route::AssignmentView {
                    class_id: (*id).to_string(),
                    assignment_id: (*aid).to_string(),
                })
            }
            ["teachers"] => Some(Route::TeacherHome),
            ["teachers", "classes", id] => Some(Route::TeacherClassroom {
                class_id: (*id).to_string(),
            }),
            ["teachers", "classes", id, "assignments", aid] => Some(Route::TeacherAssignment {
                class_id: (*id).to_string(),
                assignment_id: (*aid).to_string(),
            }),
            ["teachers", "classes", id, "assignments", aid, "view", sid] => {
                Some(Route::GradingView {
                    class_id: (*id).to_string(),
                    assignment_id: (*aid).to_string(),
                    student_id: (*sid).to_string(),
                })
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::StudentHome => "/students".to_string(),
            Route::StudentClassroom { class_id } => {
                format!("/students/classes/{}", class_id)
            }
            Route::AssignmentSolve {
                class_id,
                assignment_id,
            } => format!(
                "/students/classes/{}/assignments/{}/solve",
                class_id, assignment_id
            ),
            Route::AssignmentView {
                class_id,
                assignment_id,
            } => format!(
                "/students/classes/{}/assignments/{}/view",
                class_id, assignment_id
            ),
            Route::TeacherHome => "/teachers".to_string(),
            Route::TeacherClassroom { class_id } => {
                format!("/teachers/classes/{}", class_id)
            }
            Route::TeacherAssignment {
                class_id,
                assignment_id,
            } => format!(
                "/teachers/classes/{}/assignments/{}",
                class_id, assignment_id
            ),
            Route::GradingView {
                class_id,
                assignment_id,
                student_id,
            } => format!(
                "/teachers/classes/{}/assignments/{}/view/{}",
                class_id, assignment_id, student_id
            ),
        }
    }

    /// Which role's subtree owns this route; `None` for the anonymous pair.
    pub fn role_scope(&self) -> Option<Role> {
        match self {
            Route::Login | Route::Register => None,
            Route::StudentHome
            | Route::StudentClassroom { .. }
            | Route::AssignmentSolve { .. }
            | Route::AssignmentView { .. } => Some(Role::Student),
            Route::TeacherHome
            | Route::TeacherClassroom { .. }
            | Route::TeacherAssignment { .. }
            | Route::GradingView { .. } => Some(Role::Teacher),
        }
    }
}

/// The post-login root for a role.
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Student => Route::StudentHome,
        Role::Teacher => Route::TeacherHome,
    }
}

//=========================================================================================
// Shared Navigation State
//=========================================================================================

/// The process-wide "current route" cell.
///
/// Pages navigate with `goto`; the auth-failure interceptor uses
/// `force_login`, which also bumps a counter so tests can assert exactly
/// one forced redirect per offending response.
#[derive(Clone)]
pub struct NavigationHandle {
    inner: Arc<RwLock<NavState>>,
}

struct NavState {
    current: Route,
    forced_redirects: u64,
}

impl NavigationHandle {
    /// A fresh visit starts anonymous, on the login page.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(NavState {
                current: Route::Login,
                forced_redirects: 0,
            })),
        }
    }

    pub fn goto(&self, route: Route) {
        let mut state = self.inner.write().expect("navigation lock poisoned");
        state.current = route;
    }

    /// The interceptor's forced transition back to anonymous. In-flight
    /// page state is discarded by the caller abandoning its load.
    pub fn force_login(&self) {
        let mut state = self.inner.write().expect("navigation lock poisoned");
        state.current = Route::Login;
        state.forced_redirects += 1;
    }

    pub fn current(&self) -> Route {
        self.inner
            .read()
            .expect("navigation lock poisoned")
            .current
            .clone()
    }

    pub fn forced_redirects(&self) -> u64 {
        self.inner
            .read()
            .expect("navigation lock poisoned")
            .forced_redirects
    }
}

impl Default for NavigationHandle {
    fn default() -> Self {
        Self::new()
    }
}

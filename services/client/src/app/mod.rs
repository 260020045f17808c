pub mod interceptor;
pub mod notices;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

// Re-export the pieces every embedding needs to wire a client.
pub use pages::{load_page, PageState};
pub use routes::{home_for, NavigationHandle, Route};
pub use session::SessionHandle;
pub use state::AppState;

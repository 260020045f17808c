//! services/client/src/lib.rs
//!
//! Library surface of the classroom client: configuration, the HTTP
//! adapters implementing the core ports, and the session / navigation /
//! page-loading layer.

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;

//! HTTP API layer for troophq.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: authentication, reports, strikes, supervisor workflows
//! - **Extractors**: bearer sessions and supervisor role gating
//! - **Middleware**: token verification
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use extractors::{Session, Supervisor};
pub use middleware::{auth_middleware, AppState};

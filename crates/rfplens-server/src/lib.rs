//! rfplens HTTP façade
//!
//! Thin request/response marshalling over the core pipelines. All state is
//! constructed at startup and injected; see [`state::AppState`].

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

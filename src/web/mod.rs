//! HTTP API for filedesk.
//!
//! JSON routes over the file service: directory and file listings, file
//! record creation, and content resolution.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;

//! Data Transfer Objects for the HTTP API.

pub mod extract;
pub mod request;
pub mod response;

pub use extract::ApiJson;
pub use request::*;
pub use response::*;

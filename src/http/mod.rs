//! HTTP protocol layer module
//!
//! Protocol helpers shared by the static pipeline middleware and the server,
//! decoupled from both.

pub mod cache;
pub mod date;
pub mod mime;
pub mod response;

pub use response::{build_404_response, build_500_response};

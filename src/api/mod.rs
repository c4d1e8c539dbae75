//! HTTP API over [GraphService](crate::service::GraphService).

mod error;
pub mod handlers;
mod router;

pub use error::{ApiError, RUN_FAILED_MESSAGE};
pub use router::router;

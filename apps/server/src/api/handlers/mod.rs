//! Request handlers for API endpoints
//!
//! Handlers extract the request, call a service and wrap the result in the
//! success envelope. Errors render through [`crate::Error`].

pub mod metrics;
pub mod patients;
pub mod records;
pub mod staff;

pub use metrics::metrics_handler;

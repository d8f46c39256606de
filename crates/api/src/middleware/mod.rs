//! Response-shaping middleware.
//!
//! - [`error_detail::expose_error_detail`] -- Copies internal error text into
//!   500 bodies when the environment allows it.
//! - [`recover::panic_response`] -- Renders caught panics with the standard
//!   error envelope.

pub mod error_detail;
pub mod recover;

//! # API Shared
//!
//! Shared definitions for the MBS estimator APIs.
//!
//! Contains:
//! - JSON request and response bodies with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `mbs-run` binary.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

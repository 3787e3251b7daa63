//! Student service API client and types.
//!
//! This module provides the interface for communicating with the student
//! management REST service.

mod client;
pub mod error;
pub mod types;

pub use client::{StudentClient, SERVICE_PATH};
pub use error::ApiError;
pub use types::{filter_students, parse_leading_int, Student, StudentId, StudentPayload};

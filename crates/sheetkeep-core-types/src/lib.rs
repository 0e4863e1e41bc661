//! Core types shared across SheetKeep facilities
//!
//! This crate provides foundational types used by the error, logging and
//! persistence layers:
//!
//! - **Correlation types**: RequestId
//! - **Request context**: RequestContext with cooperative cancellation
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};

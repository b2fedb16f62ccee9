//! Core types for jobdock.
//!
//! This crate defines the read-only pipeline configuration view
//! ([`PipelineConfig`], [`JobSpec`]), the resolved invocation intent
//! ([`BuildRequest`]), and the shared error type.

pub mod config;
pub mod error;
pub mod request;

pub use config::{JobSpec, PipelineConfig};
pub use error::{Error, Result};
pub use request::BuildRequest;

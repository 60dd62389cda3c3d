//! HTTP plumbing shared by Reelhouse services: tracing setup, request ids,
//! panic recovery and the `{"error": ...}` body.

pub mod error;
pub mod middleware;
pub mod tracing;

//! Test utilities for Reelhouse services.
//!
//! Provides `MockAuth` for building authenticated requests.
//! Import in tests only; never in production code.

pub mod auth;

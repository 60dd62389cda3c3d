//! Session token types shared by the catalog service and its tests.
//!
//! Provides signed session-token issue/validation and the `BearerToken`
//! extractor used by the service's route guards.

pub mod bearer;
pub mod token;

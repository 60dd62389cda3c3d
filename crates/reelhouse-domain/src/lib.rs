//! Domain types shared across Reelhouse crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod movie;
pub mod pagination;
pub mod rating;
pub mod user;

//! sea-orm entities for the catalog database.

pub mod actors;
pub mod email_verification_tokens;
pub mod movie_cast;
pub mod movies;
pub mod outbox_events;
pub mod password_reset_tokens;
pub mod reviews;
pub mod users;

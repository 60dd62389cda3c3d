pub mod access;
pub mod actor;
pub mod admin;
pub mod media;
pub mod movie;
pub mod password;
pub mod rating;
pub mod review;
pub mod token;
pub mod user;

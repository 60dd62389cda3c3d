pub mod actor;
pub mod admin;
pub mod form;
pub mod health;
pub mod movie;
pub mod review;
pub mod user;

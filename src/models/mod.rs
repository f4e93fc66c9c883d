pub mod application;
pub mod form_config;
pub mod job;
pub mod user;

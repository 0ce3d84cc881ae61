pub mod annotations;
pub mod auth;
pub mod browse;

pub mod auth;
pub mod common;
pub mod fixture;
pub mod fixture_result;
pub mod prediction;
pub mod settings;
pub mod user;

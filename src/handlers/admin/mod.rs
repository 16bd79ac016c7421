pub mod dashboard_handler;
pub mod user_handler;

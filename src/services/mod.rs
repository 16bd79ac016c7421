pub mod admin_service;
pub mod error;
pub mod fixture_service;
pub mod leaderboard_service;
pub mod prediction_service;
pub mod result_service;

pub use admin_service::AdminService;
pub use fixture_service::FixtureService;
pub use leaderboard_service::LeaderboardService;
pub use prediction_service::PredictionService;
pub use result_service::ResultService;

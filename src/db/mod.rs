pub mod fixtures;
pub mod helpers;
pub mod predictions;
pub mod results;
pub mod settings;
pub mod users;

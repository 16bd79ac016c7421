use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod fixtures;
pub mod leaderboard;
pub mod predictions;
pub mod registration;
pub mod results;
pub mod settings;
pub mod users;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // Public reads
    cfg.service(fixtures::get_fixtures)
        .service(results::get_results)
        .service(leaderboard::get_leaderboard)
        .service(leaderboard::get_gameweek_leaderboard)
        .service(settings::get_settings);

    // Session routes (require authentication)
    cfg.service(
        web::scope("/auth")
            .wrap(AuthMiddleware)
            .service(auth::me)
    );
    cfg.service(
        web::scope("/users")
            .wrap(AuthMiddleware)
            .service(users::get_my_stats)
    );
    cfg.service(
        web::scope("/predictions")
            .wrap(AuthMiddleware)
            .service(predictions::get_predictions)
            .service(predictions::save_prediction)
            .service(predictions::save_gameweek_predictions)
            .service(predictions::remove_prediction)
    );

    admin::init_admin_routes(cfg);
}

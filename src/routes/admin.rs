use actix_web::web;

use crate::handlers::admin::{dashboard_handler, user_handler};
use crate::handlers::{fixture_handler, prediction_handler, result_handler, settings_handler};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Dashboard
            .service(
                web::resource("/overview")
                    .route(web::get().to(dashboard_handler::get_overview))
            )
            .service(
                web::resource("/missing-predictions")
                    .route(web::get().to(dashboard_handler::get_missing_predictions))
            )

            // Fixture import
            .service(
                web::resource("/fixtures")
                    .route(web::post().to(fixture_handler::import_fixtures))
            )
            .service(
                web::resource("/fixtures/{id}")
                    .route(web::delete().to(fixture_handler::delete_fixture))
            )

            // Results
            .service(
                web::resource("/results")
                    .route(web::post().to(result_handler::record_result))
            )
            .service(
                web::resource("/results/{id}")
                    .route(web::delete().to(result_handler::delete_result))
            )

            // Predictions
            .service(
                web::resource("/predictions")
                    .route(web::get().to(dashboard_handler::get_gameweek_predictions))
                    .route(web::post().to(prediction_handler::override_prediction))
            )

            // User management
            .service(
                web::resource("/users")
                    .route(web::get().to(user_handler::get_users))
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::delete().to(user_handler::delete_user))
            )
            .service(
                web::resource("/users/{id}/role")
                    .route(web::patch().to(user_handler::update_user_role))
            )

            // Site settings
            .service(
                web::resource("/settings/{key}")
                    .route(web::put().to(settings_handler::update_setting))
            )
    );
}

// Route exports
pub mod geo;
pub mod items;

pub use items::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(items::configure)
            .configure(geo::configure),
    );
}

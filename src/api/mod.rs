mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod tx;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse};
use log::warn;

pub use models::AppState;
pub use nodes::spawn_periodic_resolve;

use models::ErrorResponse;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(mining::mine_block)
            .service(tx::post_transaction)
            .service(tx::get_mempool)
            .service(nodes::register_nodes)
            .service(nodes::list_nodes)
            .service(nodes::resolve_nodes),
    );
}

/// Malformed or incomplete JSON bodies become a 400 with the reason.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    warn!("{} {} - rejected payload: {}", req.method(), req.path(), reason);
    let resp = HttpResponse::BadRequest().json(ErrorResponse { error: reason });
    InternalError::from_response(err, resp).into()
}

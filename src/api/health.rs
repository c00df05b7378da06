use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        node_id: state.node.id().to_string(),
        height: state.node.len(),
        peers: state.node.peers().len(),
    })
}

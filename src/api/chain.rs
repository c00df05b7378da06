use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ValidateResponse};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.node.chain_snapshot())
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.node.is_valid(),
        length: state.node.len(),
        difficulty: state.node.difficulty(),
    })
}

use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, MempoolResponse, NewTxRequest, NewTxResponse};

/// Submit a new transaction into the pending pool.
///
/// Missing fields are rejected by the JSON extractor before this runs.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();
    debug!(
        "POST /transactions/new/ - sender={} recipient={} amount={}",
        sender, recipient, amount
    );

    let index = state.node.submit_transaction(sender, recipient, amount);

    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// List the pending pool.
#[get("/mempool/")]
pub async fn get_mempool(state: web::Data<AppState>) -> impl Responder {
    let transactions = state.node.pending_transactions();
    HttpResponse::Ok().json(MempoolResponse {
        size: transactions.len(),
        transactions,
    })
}

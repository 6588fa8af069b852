use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Submit a transaction into the pending pool.
///
/// Field semantics are not validated here: the ledger is permissive about
/// addresses and amounts, and structurally malformed JSON is rejected by the
/// extractor before this handler runs.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let req = body.into_inner();
    let index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.create_transaction(&req.sender, &req.recipient, req.amount)
    };
    info!(
        "TX - queued {} -> {} (amount={}) for block #{}",
        req.sender, req.recipient, req.amount, index
    );
    HttpResponse::Created().json(NewTxResponse {
        index,
        message: format!("Transaction will be added to block {}", index),
    })
}

/// List transactions awaiting inclusion in the next mined block.
#[get("/transactions/pending")]
pub async fn pending_transactions(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let transactions = bc.pending().to_vec();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}

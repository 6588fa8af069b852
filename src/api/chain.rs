use actix_web::{HttpResponse, Responder, get, web};
use log::{info, warn};

use super::models::{AppState, ChainResponse, MineQuery, MineResponse, ValidateResponse};
use crate::blockchain::{Blockchain, pow};

/// Get the full blockchain. Peers fetch this endpoint during consensus
/// resolution, so the response shape is part of the wire contract.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: &bc.chain,
        length: bc.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Self-check: validate the local chain's linkage and proofs.
#[get("/chain/valid")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: Blockchain::valid_chain(&bc.chain),
        length: bc.len(),
    })
}

/// Mine one block: search a proof over the last block's proof, credit the
/// reward, seal. The proof search runs on the blocking pool and holds no lock,
/// so the executor keeps serving chain queries and transaction submissions
/// while it grinds.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>, query: web::Query<MineQuery>) -> impl Responder {
    let recipient = query
        .into_inner()
        .recipient
        .unwrap_or_else(|| state.node_id.clone());

    let last_proof = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.last_block().proof
    };

    let proof = match web::block(move || pow::proof_of_work(last_proof)).await {
        Ok(proof) => proof,
        Err(e) => {
            warn!("MINER - proof search aborted: {}", e);
            return HttpResponse::InternalServerError().body("proof search aborted");
        }
    };

    let block = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.seal_block(proof, &recipient).clone()
    };

    info!("MINER - block #{} forged for {}", block.index, recipient);
    HttpResponse::Ok().json(MineResponse {
        message: "New block forged".to_string(),
        block,
    })
}

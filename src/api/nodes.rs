use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, PeersResponse, RegisterRequest, RegisterResponse, ResolveResponse};
use crate::network::resolver;

/// Register a peer node address for consensus resolution.
#[post("/nodes/register")]
pub async fn register_node(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    let address = body.address.trim();
    if address.is_empty() {
        return HttpResponse::BadRequest().body("address required");
    }

    let (added, peers) = {
        let mut peers = state.peers.lock().expect("mutex poisoned");
        let added = peers.register(address);
        (added, peers.addresses().to_vec())
    };

    let message = if added {
        "Peer registered"
    } else {
        "Peer already registered"
    };
    info!("NODES - register {}: {}", address, message);
    HttpResponse::Created().json(RegisterResponse {
        message: message.to_string(),
        peers,
    })
}

/// List registered peers, in registration order.
#[get("/nodes")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let peers = state.peers.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PeersResponse {
        count: peers.len(),
        peers: peers.addresses().to_vec(),
    })
}

/// Run the consensus algorithm: fetch every registered peer's chain
/// concurrently, keep the longest valid one strictly exceeding the local
/// length, and adopt it wholesale. Peers that are unreachable, slow, or
/// serve invalid data are skipped; they never abort the round.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let peers = {
        let peers = state.peers.lock().expect("mutex poisoned");
        peers.addresses().to_vec()
    };
    let local_len = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.len()
    };

    // Fan out with no locks held; wait for every peer's outcome.
    let results = state.client.fetch_all(&peers).await;

    let mut candidates = Vec::new();
    for (peer, result) in peers.iter().zip(results) {
        match result {
            Ok(remote) => candidates.push(remote),
            Err(e) => warn!("SYNC - skipping peer {}: {}", peer, e),
        }
    }

    let (replaced, length) = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        // The chain may have grown while fetches were in flight; compare
        // candidates against the current length before adopting.
        match resolver::longest_valid_chain(bc.len().max(local_len), candidates) {
            Some(chain) => {
                bc.replace_chain(chain);
                (true, bc.len())
            }
            None => (false, bc.len()),
        }
    };

    info!("SYNC - resolved (replaced={}, length={})", replaced, length);
    let message = if replaced {
        "Local chain replaced"
    } else {
        "Local chain is authoritative"
    };
    HttpResponse::Ok().json(ResolveResponse {
        replaced,
        length,
        message: message.to_string(),
    })
}

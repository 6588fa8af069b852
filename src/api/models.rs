use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blockchain::{Block, Blockchain};
use crate::network::{DEFAULT_PEER_TIMEOUT, PeerClient, PeerSet};
use crate::transaction::Transaction;

/// Shared application state: the chain store and peer registry behind mutexes
/// (at most one structural mutation in flight at a time), the HTTP client used
/// for consensus resolution, and this node's identifier, which doubles as the
/// default mining reward recipient.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
    pub peers: Mutex<PeerSet>,
    pub client: PeerClient,
    pub node_id: String,
}

impl AppState {
    pub fn new(peer_timeout: Duration) -> Self {
        Self {
            blockchain: Mutex::new(Blockchain::new()),
            peers: Mutex::new(PeerSet::new()),
            client: PeerClient::new(peer_timeout),
            node_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PEER_TIMEOUT)
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Deserialize)]
pub struct MineQuery {
    pub recipient: Option<String>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub block: Block,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub index: u64,
    pub message: String,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub address: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct PeersResponse {
    pub count: usize,
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub replaced: bool,
    pub length: usize,
    pub message: String,
}

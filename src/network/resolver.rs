use std::time::Duration;

use futures::future;
use log::{debug, warn};
use serde::Deserialize;

use super::DEFAULT_PEER_TIMEOUT;
use crate::blockchain::{Block, Blockchain};

/// Shape of a peer's `GET /chain` response (the same shape this node serves).
#[derive(Debug, Deserialize)]
pub struct RemoteChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// HTTP client for peer chain queries, bounded by a per-request timeout so an
/// unresponsive peer cannot stall a resolution round.
#[derive(Debug, Clone)]
pub struct PeerClient {
    http: reqwest::Client,
}

impl PeerClient {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("build http client");
        Self { http }
    }

    /// Fetch one peer's chain. Network errors, timeouts, non-2xx statuses and
    /// malformed bodies all collapse into a per-peer error: the peer is simply
    /// absent from this round's candidates.
    pub async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, String> {
        let url = format!("http://{}/chain", peer);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", peer, e))?;
        if !resp.status().is_success() {
            return Err(format!("{} answered {}", peer, resp.status()));
        }
        resp.json::<RemoteChain>()
            .await
            .map_err(|e| format!("malformed chain from {}: {}", peer, e))
    }

    /// Query every peer concurrently and wait for all outcomes; a late peer
    /// may still hold the longest chain, so no early termination. Results come
    /// back in the same order as `peers`, which keeps the selection fold on
    /// registration order.
    pub async fn fetch_all(&self, peers: &[String]) -> Vec<Result<RemoteChain, String>> {
        future::join_all(peers.iter().map(|p| self.fetch_chain(p))).await
    }
}

impl Default for PeerClient {
    fn default() -> Self {
        Self::new(DEFAULT_PEER_TIMEOUT)
    }
}

/// Fold candidate chains in registration order, keeping the longest one that
/// is strictly longer than the running maximum and passes full validation.
/// First-seen wins among equal lengths, since only strictly greater lengths
/// update the maximum.
///
/// A peer's claimed `length` field is ignored in favor of the block count
/// actually received, so a peer cannot win on a fabricated number.
pub fn longest_valid_chain(local_len: usize, candidates: Vec<RemoteChain>) -> Option<Vec<Block>> {
    let mut max_len = local_len;
    let mut best: Option<Vec<Block>> = None;

    for candidate in candidates {
        let len = candidate.chain.len();
        if len != candidate.length {
            debug!(
                "SYNC - peer reported length {} but sent {} blocks",
                candidate.length, len
            );
        }
        if len <= max_len {
            continue;
        }
        if !Blockchain::valid_chain(&candidate.chain) {
            warn!("SYNC - discarding invalid candidate chain of {} blocks", len);
            continue;
        }
        max_len = len;
        best = Some(candidate.chain);
    }

    best
}

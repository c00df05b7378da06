//! Longest-valid-chain reconciliation between peers.
//!
//! Every known peer's chain is fetched and judged independently, then the
//! results are reduced to the single longest chain that is strictly longer
//! than ours and passes validation. Fetching is abstracted behind
//! [`ChainFetcher`] so the reduction can be exercised without a network.

pub mod http;
pub mod peers;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::{Block, ProofOfWork, validate_chain};

pub use http::HttpChainFetcher;
pub use peers::{PeerSet, normalize_address};

/// Chain copy exchanged between nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainSnapshot {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("peer {peer} unreachable: {reason}")]
    Unreachable { peer: String, reason: String },

    #[error("peer {peer} sent a malformed response: {reason}")]
    Malformed { peer: String, reason: String },
}

/// Source of remote chains, one call per peer.
pub trait ChainFetcher: Sync {
    fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, FetchError>;
}

/// Outcome of a reconciliation round.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No peer offered a longer valid chain.
    Kept,
    /// The longest valid peer chain, to be adopted.
    Replaced(Vec<Block>),
}

impl Resolution {
    pub fn replaced(&self) -> bool {
        matches!(self, Resolution::Replaced(_))
    }
}

/// Ask every peer for its chain and pick the longest valid one that beats
/// `own_chain`. Unreachable peers, malformed answers and invalid chains are
/// logged and skipped. Equal length never wins.
pub fn resolve_conflicts<F>(
    own_chain: &[Block],
    peers: &PeerSet,
    fetcher: &F,
    pow: &ProofOfWork,
) -> Resolution
where
    F: ChainFetcher + ?Sized,
{
    let own_len = own_chain.len();
    let addresses: Vec<&str> = peers.iter().collect();
    debug!(
        "CONSENSUS - polling {} peers (own length {})",
        addresses.len(),
        own_len
    );

    let best = addresses
        .par_iter()
        .filter_map(|peer| candidate_from(peer, own_len, fetcher, pow))
        .max_by_key(|chain| chain.len());

    match best {
        Some(chain) => {
            info!(
                "CONSENSUS - adopting chain of length {} (was {})",
                chain.len(),
                own_len
            );
            Resolution::Replaced(chain)
        }
        None => {
            debug!("CONSENSUS - own chain is authoritative");
            Resolution::Kept
        }
    }
}

/// Fetch one peer's chain and keep it only if it is longer and valid.
fn candidate_from<F>(
    peer: &str,
    own_len: usize,
    fetcher: &F,
    pow: &ProofOfWork,
) -> Option<Vec<Block>>
where
    F: ChainFetcher + ?Sized,
{
    let snapshot = match fetcher.fetch_chain(peer) {
        Ok(s) => s,
        Err(e) => {
            warn!("CONSENSUS - skipping peer: {e}");
            return None;
        }
    };

    if snapshot.length != snapshot.chain.len() {
        warn!(
            "CONSENSUS - skipping peer {}: reported length {} but sent {} blocks",
            peer,
            snapshot.length,
            snapshot.chain.len()
        );
        return None;
    }

    if snapshot.length <= own_len {
        debug!(
            "CONSENSUS - peer {} chain length {} does not beat {}",
            peer, snapshot.length, own_len
        );
        return None;
    }

    if let Err(e) = validate_chain(&snapshot.chain, pow) {
        warn!("CONSENSUS - rejecting chain from {}: {}", peer, e);
        return None;
    }

    Some(snapshot.chain)
}

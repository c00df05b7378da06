use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::config::NodeConfig;
use crate::consensus::{HttpChainFetcher, Resolution};
use crate::node::Node;
use crate::transaction::Transaction;

/// Shared application state: the node plus the knobs the handlers need.
pub struct AppState {
    pub node: Node,
    pub peer_timeout: Duration,
    pub mining_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(config: &NodeConfig) -> Self {
        info!(
            "NODE - id={} difficulty={}",
            config.node_id, config.difficulty
        );
        Self {
            node: Node::new(config.node_id.clone(), config.difficulty),
            peer_timeout: config.peer_timeout,
            mining_timeout: config.mining_timeout,
        }
    }

    /// Run one consensus round against the registered peers over HTTP.
    /// Blocking: call it from `web::block`.
    pub fn resolve_conflicts(&self) -> Result<Resolution, reqwest::Error> {
        let fetcher = HttpChainFetcher::new(self.peer_timeout)?;
        Ok(self.node.resolve_conflicts(&fetcher))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&NodeConfig::default())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub node_id: String,
    pub height: usize,
    pub peers: usize,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged".to_string(),
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct MempoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Peer API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

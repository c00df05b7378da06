//! A ledger node: one [`Blockchain`] and its peers behind a single lock each.
//!
//! All chain and pool mutations go through the ledger mutex. The puzzle
//! search and peer fetches run outside it; their results are re-checked
//! under the lock before anything is committed.

use std::sync::atomic::AtomicBool;

use log::{info, warn};
use parking_lot::Mutex;

use crate::blockchain::{Block, Blockchain, ProofOfWork};
use crate::consensus::{self, ChainFetcher, ChainSnapshot, PeerSet, Resolution};
use crate::error::Result;
use crate::transaction::{MINING_REWARD, MINING_REWARD_SENDER, Transaction};

#[derive(Debug)]
pub struct Node {
    node_id: String,
    blockchain: Mutex<Blockchain>,
    peers: Mutex<PeerSet>,
}

impl Node {
    pub fn new(node_id: impl Into<String>, difficulty: u32) -> Self {
        Self {
            node_id: node_id.into(),
            blockchain: Mutex::new(Blockchain::new(difficulty)),
            peers: Mutex::new(PeerSet::new()),
        }
    }

    /// Identifier credited by mining rewards.
    pub fn id(&self) -> &str {
        &self.node_id
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn submit_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
    ) -> u64 {
        self.blockchain
            .lock()
            .new_transaction(sender, recipient, amount)
    }

    /// Solve the puzzle for the current head, pay the reward to this node and
    /// seal the pending pool into a new block.
    ///
    /// If the head changes while searching (e.g. consensus swapped the chain)
    /// and the proof no longer fits, the search restarts on the new head.
    pub fn mine(&self, cancel: &AtomicBool) -> Result<Block> {
        loop {
            let (last_proof, pow) = {
                let bc = self.blockchain.lock();
                (bc.last_block().proof, bc.proof_of_work())
            };

            let proof = pow.solve(last_proof, cancel)?;
            if let Some(block) = self.seal(&pow, proof) {
                return Ok(block);
            }
        }
    }

    /// Pay the reward and seal the pool with `proof`, provided it still
    /// solves the puzzle for the current head. `None` means the head moved.
    fn seal(&self, pow: &ProofOfWork, proof: u64) -> Option<Block> {
        let mut bc = self.blockchain.lock();
        if !pow.verify(bc.last_block().proof, proof) {
            warn!(
                "MINER - head moved during search (proof {} stale), retrying",
                proof
            );
            return None;
        }

        bc.new_transaction(MINING_REWARD_SENDER, self.node_id.as_str(), MINING_REWARD);
        let block = bc.new_block(proof, None).clone();
        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Some(block)
    }

    pub fn chain_snapshot(&self) -> ChainSnapshot {
        ChainSnapshot::new(self.blockchain.lock().chain().to_vec())
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.blockchain.lock().pending_transactions().to_vec()
    }

    pub fn is_valid(&self) -> bool {
        self.blockchain.lock().is_valid_chain()
    }

    pub fn len(&self) -> usize {
        self.blockchain.lock().len()
    }

    pub fn difficulty(&self) -> u32 {
        self.blockchain.lock().difficulty()
    }

    pub fn last_block(&self) -> Block {
        self.blockchain.lock().last_block().clone()
    }

    /// Register a peer; returns its normalized `host:port`.
    pub fn register_peer(&self, address: &str) -> Result<String> {
        let normalized = self.peers.lock().register(address)?;
        info!("PEERS - registered {}", normalized);
        Ok(normalized)
    }

    /// Register several peers; nothing is added unless every address is usable.
    pub fn register_peers<S: AsRef<str>>(&self, addresses: &[S]) -> Result<Vec<String>> {
        let added = self.peers.lock().register_all(addresses)?;
        info!("PEERS - registered {}", added.join(", "));
        Ok(added)
    }

    pub fn peers(&self) -> Vec<String> {
        let mut list: Vec<String> = self.peers.lock().iter().map(str::to_string).collect();
        list.sort();
        list
    }

    /// Poll every peer and adopt the longest valid chain if it beats ours.
    ///
    /// The replacement is re-checked under the ledger lock so a block mined
    /// while peers were being polled is never lost to an equal-length chain.
    pub fn resolve_conflicts<F>(&self, fetcher: &F) -> Resolution
    where
        F: ChainFetcher + ?Sized,
    {
        let (own_chain, pow) = {
            let bc = self.blockchain.lock();
            (bc.chain().to_vec(), bc.proof_of_work())
        };
        let peers = self.peers.lock().clone();

        let resolution = consensus::resolve_conflicts(&own_chain, &peers, fetcher, &pow);

        match resolution {
            Resolution::Replaced(chain) => {
                let mut bc = self.blockchain.lock();
                if chain.len() > bc.len() {
                    bc.replace_chain(chain.clone());
                    Resolution::Replaced(chain)
                } else {
                    warn!(
                        "CONSENSUS - local chain grew to {} while resolving, keeping it",
                        bc.len()
                    );
                    Resolution::Kept
                }
            }
            Resolution::Kept => Resolution::Kept,
        }
    }
}

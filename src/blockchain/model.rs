use log::debug;

use super::validation::validate_chain;
use super::{Block, ProofOfWork};
use crate::transaction::Transaction;

/// In-memory ledger: the chain plus the pool of pending transactions.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    current_transactions: Vec<Transaction>,
    pow: ProofOfWork,
}

impl Blockchain {
    /// Initialize a new ledger seeded with the genesis block.
    pub fn new(difficulty: u32) -> Self {
        Self {
            chain: vec![Block::genesis()],
            current_transactions: Vec::new(),
            pow: ProofOfWork::new(difficulty),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        // The chain is seeded at construction and only ever replaced by a
        // longer one, so it is never empty.
        &self.chain[self.chain.len() - 1]
    }

    /// Queue a transaction for the next block and return that block's index.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
    ) -> u64 {
        self.current_transactions
            .push(Transaction::new(sender, recipient, amount));
        debug!(
            "LEDGER - pool size now {}",
            self.current_transactions.len()
        );
        self.last_block().index + 1
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// `previous_hash` defaults to the digest of the current last block.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let transactions = std::mem::take(&mut self.current_transactions);
        let block = Block::new(
            self.chain.len() as u64 + 1,
            transactions,
            proof,
            previous_hash,
        );
        self.chain.push(block);
        self.last_block()
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.current_transactions
    }

    /// Validate the ledger's own chain: linkage and Proof-of-Work.
    pub fn is_valid_chain(&self) -> bool {
        validate_chain(&self.chain, &self.pow).is_ok()
    }

    /// Swap in a chain adopted through consensus. Pending transactions stay
    /// in the pool.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        if chain.is_empty() {
            return;
        }
        self.chain = chain;
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.pow.difficulty()
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        self.pow
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new(super::DEFAULT_DIFFICULTY)
    }
}

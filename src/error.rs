//! Error types shared across the ledger.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The caller raised the cancellation flag before a proof was found.
    #[error("proof-of-work search cancelled after {attempts} attempts")]
    MiningCancelled { attempts: u64 },

    #[error("proof-of-work search space exhausted for last proof {last_proof}")]
    ProofSpaceExhausted { last_proof: u64 },

    #[error("invalid peer address: {0}")]
    InvalidPeerAddress(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

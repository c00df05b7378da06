//! Append-only ledger with Proof-of-Work and longest-valid-chain consensus.
//!
//! - `blockchain`: blocks, digests, the puzzle, the ledger store and the
//!   chain validator
//! - `consensus`: peer set, chain fetching and conflict resolution
//! - `node`: a ledger plus its peers behind one lock each
//! - `api`: the HTTP surface served by the node binary

pub mod api;
pub mod blockchain;
pub mod config;
pub mod consensus;
pub mod error;
pub mod node;
pub mod transaction;

pub use blockchain::{Block, Blockchain, ProofOfWork};
pub use consensus::{ChainFetcher, ChainSnapshot, FetchError, PeerSet, Resolution};
pub use error::{LedgerError, Result};
pub use node::Node;
pub use transaction::Transaction;

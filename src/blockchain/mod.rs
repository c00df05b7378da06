pub mod block;
pub mod hash;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
pub use hash::{hash_block, hash_bytes};
pub use model::Blockchain;
pub use pow::ProofOfWork;
pub use validation::{ChainValidationError, is_valid_chain, validate_chain};

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

use thiserror::Error;

use super::hash::hash_block;
use super::{Block, ProofOfWork};

/// Why a chain was rejected. `index` is the position (0-based) of the
/// offending block within the chain being checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainValidationError {
    #[error("block at position {index} does not link to the digest of its predecessor")]
    BrokenLink { index: usize },

    #[error("block at position {index} carries proof {proof} that fails the puzzle")]
    InvalidProof { index: usize, proof: u64 },
}

/// Walk consecutive pairs and check linkage and Proof-of-Work.
///
/// Empty and genesis-only chains have no pairs and are valid. The genesis
/// block is never checked against a predecessor. Stops at the first broken
/// pair.
pub fn validate_chain(chain: &[Block], pow: &ProofOfWork) -> Result<(), ChainValidationError> {
    for (i, pair) in chain.windows(2).enumerate() {
        let (prev, current) = (&pair[0], &pair[1]);
        let index = i + 1;

        if current.previous_hash != hash_block(prev) {
            return Err(ChainValidationError::BrokenLink { index });
        }

        if !pow.verify(prev.proof, current.proof) {
            return Err(ChainValidationError::InvalidProof {
                index,
                proof: current.proof,
            });
        }
    }
    Ok(())
}

pub fn is_valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    validate_chain(chain, pow).is_ok()
}

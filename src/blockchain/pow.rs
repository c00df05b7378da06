use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use super::hash::hash_bytes;
use crate::error::{LedgerError, Result};

/// Proof-of-Work puzzle over pairs of proofs.
///
/// A proof `p'` is valid for the previous block's proof `p` when the SHA-256
/// of the decimal concatenation `"{p}{p'}"` starts with `difficulty` zero hex
/// digits. Finding one takes a brute-force search, checking one takes a
/// single hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Check a candidate proof against the previous block's proof.
    pub fn verify(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        hash_bytes(guess.as_bytes())
            .chars()
            .take(self.difficulty as usize)
            .all(|c| c == '0')
    }

    /// Search upwards from 0 for the first proof that verifies.
    ///
    /// `cancel` is polled before every attempt; raising it stops the search
    /// with [`LedgerError::MiningCancelled`].
    pub fn solve(&self, last_proof: u64, cancel: &AtomicBool) -> Result<u64> {
        let mut proof: u64 = 0;
        loop {
            if cancel.load(Ordering::Relaxed) {
                return Err(LedgerError::MiningCancelled { attempts: proof });
            }
            if self.verify(last_proof, proof) {
                debug!(
                    "POW - found proof {} for last proof {} (difficulty {})",
                    proof, last_proof, self.difficulty
                );
                return Ok(proof);
            }
            proof = proof
                .checked_add(1)
                .ok_or(LedgerError::ProofSpaceExhausted { last_proof })?;
        }
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(super::DEFAULT_DIFFICULTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_proof_verifies() {
        let pow = ProofOfWork::new(2);
        let never = AtomicBool::new(false);
        for last in [0u64, 100, 35_293, u64::MAX / 2] {
            let proof = pow.solve(last, &never).expect("solve");
            assert!(pow.verify(last, proof));
            let digest = hash_bytes(format!("{last}{proof}").as_bytes());
            assert!(digest.starts_with("00"));
        }
    }

    #[test]
    fn solve_returns_first_valid_proof() {
        let pow = ProofOfWork::new(1);
        let never = AtomicBool::new(false);
        let proof = pow.solve(100, &never).expect("solve");
        assert!((0..proof).all(|p| !pow.verify(100, p)));
    }

    #[test]
    fn difficulty_zero_accepts_anything() {
        let pow = ProofOfWork::new(0);
        let never = AtomicBool::new(false);
        assert_eq!(pow.solve(7, &never).expect("solve"), 0);
        assert!(pow.verify(7, 12_345));
    }

    #[test]
    fn raised_flag_cancels_search() {
        // Difficulty 64 is unreachable in practice.
        let pow = ProofOfWork::new(64);
        let cancel = AtomicBool::new(true);
        match pow.solve(100, &cancel) {
            Err(LedgerError::MiningCancelled { attempts }) => assert_eq!(attempts, 0),
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    #[test]
    fn cancel_from_another_thread() {
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let pow = ProofOfWork::new(64);
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::Relaxed);
        });

        let res = pow.solve(100, &cancel);
        stopper.join().expect("stopper thread");
        assert!(matches!(res, Err(LedgerError::MiningCancelled { .. })));
    }
}

use serde::{Deserialize, Serialize};

/// Sender used for reward transactions created by the miner itself.
pub const MINING_REWARD_SENDER: &str = "0";

/// Amount credited to the node that seals a block.
pub const MINING_REWARD: f64 = 1.0;

/// A value transfer waiting in the pending pool or sealed inside a block.
///
/// There is no signature or balance check: `amount` is an opaque number and
/// both parties are free-form identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

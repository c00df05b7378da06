pub mod model;

pub use model::{MINING_REWARD, MINING_REWARD_SENDER, Transaction};

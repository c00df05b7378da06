//! Node configuration read from the environment (after `.env` is loaded).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use uuid::Uuid;

use crate::blockchain::DEFAULT_DIFFICULTY;

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Leading zero hex digits the puzzle requires.
    pub difficulty: u32,
    /// Recipient of this node's mining rewards.
    pub node_id: String,
    /// Peers registered at startup.
    pub peers: Vec<String>,
    pub peer_timeout: Duration,
    /// Run consensus on this interval when set.
    pub resolve_interval: Option<Duration>,
    /// Cancel a mining request that runs longer than this.
    pub mining_timeout: Option<Duration>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            difficulty: DEFAULT_DIFFICULTY,
            node_id: new_node_id(),
            peers: Vec::new(),
            peer_timeout: Duration::from_secs(5),
            resolve_interval: None,
            mining_timeout: None,
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys take their
    /// defaults; unparsable ones are logged and also fall back.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str| parse_var::<u64, _>(&lookup, key).map(Duration::from_secs);

        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            difficulty: parse_var(&lookup, "DIFFICULTY").unwrap_or(defaults.difficulty),
            node_id: lookup("NODE_ID")
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or(defaults.node_id),
            peers: lookup("PEERS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            peer_timeout: secs("PEER_TIMEOUT_SECS").unwrap_or(defaults.peer_timeout),
            resolve_interval: secs("RESOLVE_INTERVAL_SECS").filter(|d| !d.is_zero()),
            mining_timeout: secs("MINING_TIMEOUT_SECS").filter(|d| !d.is_zero()),
        }
    }
}

/// Random identifier without dashes.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("CONFIG - ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> NodeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
        assert!(cfg.peers.is_empty());
        assert_eq!(cfg.peer_timeout, Duration::from_secs(5));
        assert!(cfg.resolve_interval.is_none());
        assert!(cfg.mining_timeout.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "5000"),
            ("DIFFICULTY", "2"),
            ("NODE_ID", "miner-1"),
            ("PEERS", "127.0.0.1:5001, http://127.0.0.1:5002 ,"),
            ("PEER_TIMEOUT_SECS", "3"),
            ("RESOLVE_INTERVAL_SECS", "30"),
            ("MINING_TIMEOUT_SECS", "60"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.difficulty, 2);
        assert_eq!(cfg.node_id, "miner-1");
        assert_eq!(cfg.peers, vec!["127.0.0.1:5001", "http://127.0.0.1:5002"]);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(3));
        assert_eq!(cfg.resolve_interval, Some(Duration::from_secs(30)));
        assert_eq!(cfg.mining_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config_from(&[
            ("PORT", "eighty"),
            ("DIFFICULTY", "-1"),
            ("RESOLVE_INTERVAL_SECS", "0"),
        ]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
        assert!(cfg.resolve_interval.is_none());
    }
}

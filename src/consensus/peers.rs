use std::collections::HashSet;

use url::Url;

use crate::error::{LedgerError, Result};

/// Known peers, stored as `host:port`.
#[derive(Debug, Default, Clone)]
pub struct PeerSet {
    nodes: HashSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self {
            nodes: HashSet::new(),
        }
    }

    /// Add a peer given as `http://host:port[/...]` or bare `host:port`.
    /// Returns the normalized address.
    pub fn register(&mut self, address: &str) -> Result<String> {
        let normalized = normalize_address(address)?;
        self.nodes.insert(normalized.clone());
        Ok(normalized)
    }

    /// Add every address, or none of them if any is unusable.
    pub fn register_all<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<Vec<String>> {
        let normalized = addresses
            .iter()
            .map(|a| normalize_address(a.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.nodes.extend(normalized.iter().cloned());
        Ok(normalized)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.nodes.contains(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reduce a peer address to `host:port`. Only plain `http` peers are
/// accepted, since chains are fetched over `http://`.
pub fn normalize_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    let invalid = || LedgerError::InvalidPeerAddress(address.to_string());

    if trimmed.is_empty() {
        return Err(invalid());
    }

    // Bare `host:port` is not a URL with a scheme; give it one so the
    // parser sees a host.
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
    if url.scheme() != "http" {
        return Err(invalid());
    }
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    Ok(match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::Block;

/// SHA-256 of `bytes`, rendered as 64 lowercase hex characters.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Digest of a block over its canonical serialization.
///
/// The block is turned into a JSON value whose objects are rebuilt with keys
/// in sorted order at every level, then rendered compactly and hashed. Two
/// nodes that agree on a block's field values therefore agree on its digest,
/// whatever order the fields arrived in over the wire.
pub fn hash_block(block: &Block) -> String {
    hash_bytes(canonical_json(block).as_bytes())
}

/// Canonical JSON text of a block: sorted keys, no whitespace.
pub fn canonical_json(block: &Block) -> String {
    let value = serde_json::to_value(block).expect("serialize block");
    sort_keys(value).to_string()
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

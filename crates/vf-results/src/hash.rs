//! Content-based hashing for compiled netlists.

use sha2::{Digest, Sha256};

/// SHA-256 of the netlist text, hex encoded.
///
/// Identical circuits produce identical netlists, so the digest ties log
/// lines and responses for the same circuit together across requests.
pub fn netlist_digest(netlist: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(netlist.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

//! Short entity ids.
//!
//! Ids are 8 lowercase hex chars: unique enough for one board's lifetime,
//! not globally unique and not meant to be unguessable. A collision is not
//! detected.

use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

pub const ID_LEN: usize = 8;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new id. An atomic counter gives intra-process uniqueness, the
/// nanosecond timestamp separates processes, and SHA-256 spreads the bits.
pub fn generate_id() -> String {
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut hasher = Sha256::new();
    hasher.update(seq.to_le_bytes());
    hasher.update(ts.to_le_bytes());
    let hash = hasher.finalize();
    hex::encode(&hash[..ID_LEN / 2])
}

/// Generate an id with a fixed prefix (templates use `tpl_`).
pub fn generate_prefixed_id(prefix: &str) -> String {
    format!("{}{}", prefix, generate_id())
}

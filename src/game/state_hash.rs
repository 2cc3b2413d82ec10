//! Deterministic state hashing for replay comparison
//!
//! Two states with the same gameplay content hash the same, regardless of
//! logger configuration or captured output.

use crate::game::GameState;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Presentation-only fields left out of the hash
const EXCLUDED_FIELDS: &[&str] = &["logger"];

/// Compute a deterministic hash of game state
///
/// The state is serialized to JSON, stripped of presentation fields and the
/// canonical string is hashed. Returns 0 if the state cannot be serialized.
pub fn compute_state_hash(game: &GameState) -> u64 {
    let json_value = match serde_json::to_value(game) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Warning: Failed to serialize game state for hashing: {e}");
            return 0;
        }
    };

    let cleaned = strip_metadata(json_value);

    let canonical = match serde_json::to_string(&cleaned) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to canonicalize cleaned state: {e}");
            return 0;
        }
    };

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}

/// Drop excluded fields at the top level of the state object
fn strip_metadata(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) => {
            for field in EXCLUDED_FIELDS {
                map.remove(*field);
            }
            serde_json::Value::Object(map)
        }
        other => other,
    }
}

/// Format a hash for display (first 8 hex digits)
pub fn format_hash(hash: u64) -> String {
    format!("{:08x}", (hash >> 32) as u32)
}

//! Re-share detection for raw posts.

use crate::json_utils::post_text;
use serde_json::Value;

/// Literal marker the platform prefixes to re-shared text.
pub const RESHARE_MARKER: &str = "RT @";

/// Heuristic: a post is a re-share if its text contains `RT @` anywhere.
/// This misses re-shares without the marker and flags originals that quote it;
/// both are accepted.
pub fn is_reshare(post: &Value) -> bool {
    post_text(post).is_some_and(|t| t.contains(RESHARE_MARKER))
}


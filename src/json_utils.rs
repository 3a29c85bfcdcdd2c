use serde_json::Value;

/// Text body of a raw post, if it is a string.
pub fn post_text(v: &Value) -> Option<&str> {
    v.get("text").and_then(|x| x.as_str())
}

/// Numeric id of a raw post. Prefers `id_str` (exact), falls back to `id`.
pub fn post_id(v: &Value) -> Option<u64> {
    v.get("id_str")
        .and_then(|x| x.as_str())
        .and_then(|s| s.parse().ok())
        .or_else(|| v.get("id").and_then(|x| x.as_u64()))
}


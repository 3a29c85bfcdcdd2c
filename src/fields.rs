//! The fixed attribute table used to flatten raw posts.
//!
//! Each entry pairs a dotted path into the raw post with the extractor that reads it
//! and the value substituted when the extractor fails. Extraction failures are
//! ordinary values here (`ExtractError`), not panics or swallowed exceptions, so each
//! extractor can be exercised on its own.

use crate::error::ExtractError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Reads the attribute at `path` from a raw post.
pub type Extractor = fn(post: &Value, path: &str) -> Result<Value, ExtractError>;

/// One row of the attribute table.
#[derive(Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub extract: Extractor,
    pub default: &'static str,
}

impl Field {
    const fn value(name: &'static str) -> Self {
        Self { name, extract: value_at, default: "" }
    }
    const fn datetime(name: &'static str) -> Self {
        Self { name, extract: datetime_at, default: "" }
    }

    /// Run the extractor, falling back to the default on failure.
    pub fn read_or_default(&self, post: &Value) -> Value {
        match (self.extract)(post, self.name) {
            Ok(v) => v,
            Err(e) => {
                tracing::trace!(field = self.name, "using default: {e}");
                Value::String(self.default.to_string())
            }
        }
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish()
    }
}

/// Name of the field injected into every record: the account being scraped.
pub const TARGET_USER_FIELD: &str = "author_user_name";

/// Recognized attributes, in output order.
pub const FIELDS: [Field; 33] = [
    Field::value("text"),
    Field::datetime("created_at"),
    Field::value("geo"),
    Field::value("lang"),
    Field::value("coordinates"),
    Field::value("user.favourites_count"),
    Field::value("user.statuses_count"),
    Field::value("user.description"),
    Field::value("user.location"),
    Field::value("user.id"),
    Field::datetime("user.created_at"),
    Field::value("user.verified"),
    Field::value("user.following"),
    Field::value("user.url"),
    Field::value("user.listed_count"),
    Field::value("user.followers_count"),
    Field::value("user.default_profile_image"),
    Field::value("user.utc_offset"),
    Field::value("user.friends_count"),
    Field::value("user.default_profile"),
    Field::value("user.name"),
    Field::value("user.lang"),
    Field::value("user.screen_name"),
    Field::value("user.geo_enabled"),
    Field::value("user.profile_background_color"),
    Field::value("user.profile_image_url"),
    Field::value("user.time_zone"),
    Field::value("id"),
    Field::value("favorite_count"),
    Field::value("retweeted"),
    Field::value("source"),
    Field::value("favorited"),
    Field::value("retweet_count"),
];

/// Platform datetime layout, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const PLATFORM_DATETIME: &str = "%a %b %d %H:%M:%S %z %Y";

/// Follow a dotted path through nested objects. `null` counts as unreadable.
pub fn value_at(post: &Value, path: &str) -> Result<Value, ExtractError> {
    let mut cur = post;
    let mut walked = String::with_capacity(path.len());
    for seg in path.split('.') {
        let obj = cur
            .as_object()
            .ok_or_else(|| ExtractError::NotAnObject(if walked.is_empty() { "<root>".into() } else { walked.clone() }))?;
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(seg);
        cur = obj.get(seg).ok_or_else(|| ExtractError::Missing(walked.clone()))?;
    }
    if cur.is_null() {
        return Err(ExtractError::Null(path.to_string()));
    }
    Ok(cur.clone())
}

/// Like [`value_at`], then render the platform datetime as RFC 3339 (UTC). Whole seconds
/// print without a fraction; sub-second input keeps its precision.
/// Values that are already RFC 3339 are normalized the same way.
pub fn datetime_at(post: &Value, path: &str) -> Result<Value, ExtractError> {
    let v = value_at(post, path)?;
    let raw = v.as_str().ok_or_else(|| ExtractError::BadDatetime {
        path: path.to_string(),
        raw: v.to_string(),
    })?;
    let parsed = DateTime::parse_from_str(raw, PLATFORM_DATETIME)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map_err(|_| ExtractError::BadDatetime {
            path: path.to_string(),
            raw: raw.to_string(),
        })?;
    Ok(Value::String(
        parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, false),
    ))
}

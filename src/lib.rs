mod config;
mod error;
mod paths;

mod fields;
mod filters;
mod json_utils;
mod normalize;

mod json_file;
mod tsv;
mod util;

mod oauth;
mod source;
mod upload;

mod progress;
mod pipeline;

pub use crate::config::{Credentials, RunOptions};
pub use crate::error::{ConfigError, ExtractError, Result, TetlError};
pub use crate::paths::{file_name, object_key, ArtifactKind, RunIds};
pub use crate::pipeline::{summary_line, RunSummary, TimelineEtl};

// Field table and per-attribute extractors.
pub use crate::fields::{datetime_at, value_at, Extractor, Field, FIELDS, PLATFORM_DATETIME, TARGET_USER_FIELD};
pub use crate::filters::{is_reshare, RESHARE_MARKER};
pub use crate::normalize::{normalize, normalize_with, Record, RecordSet};

// Serializers.
pub use crate::json_file::{records_to_json, write_json_file};
pub use crate::tsv::{reformat_timestamp, write_tsv, write_tsv_file, TsvRow, TSV_COLUMNS, TSV_TIMESTAMP};

// Source and sink seams.
pub use crate::oauth::{percent_encode, Nonce, Signer};
pub use crate::source::{Page, PageCursor, PostSource, TwitterClient, USER_TIMELINE_PATH};
pub use crate::upload::{ObjectStore, S3Store};

pub use crate::util::{init_tracing_once, write_atomic};

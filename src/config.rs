use crate::error::{ConfigError, Result};
use chrono_tz::Tz;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Static API secrets read from the local credential file.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Load the four secrets from a JSON document such as
    /// `{"consumer_key": "..", "consumer_secret": "..", "access_token": "..", "access_token_secret": ".."}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let creds: Credentials = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for (name, value) in [
            ("consumer_key", &creds.consumer_key),
            ("consumer_secret", &creds.consumer_secret),
            ("access_token", &creds.access_token),
            ("access_token_secret", &creds.access_token_secret),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{}: {name} is empty", path.display())).into());
            }
        }
        tracing::debug!("loaded credentials from {}", path.display());
        Ok(creds)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("access_token_secret", &"[REDACTED]")
            .finish()
    }
}

/// Everything a run needs, constructed once and handed to each stage.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub user_name: String,              // account being scraped
    pub credentials_path: PathBuf,
    pub out_dir: PathBuf,               // where the two local artifacts land
    pub bucket: String,
    pub region: String,
    pub raw_prefix: String,             // key prefix for the JSON artifact
    pub tsv_prefix: String,             // key prefix for the TSV artifact
    pub run_zone: Tz,                   // zone of the run stamp in file names
    pub api_base: String,
    pub page_size: u32,                 // posts per timeline request, 1..=200
    pub s3_endpoint: Option<String>,    // Some(url) for S3-compatible stores
    pub progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            credentials_path: PathBuf::from("twitter_keys.json"),
            out_dir: PathBuf::from("."),
            bucket: String::new(),
            region: "eu-west-1".to_string(),
            raw_prefix: "data/raw".to_string(),
            tsv_prefix: "data/tsv".to_string(),
            run_zone: chrono_tz::Europe::Helsinki,
            api_base: "https://api.twitter.com".to_string(),
            page_size: 200,
            s3_endpoint: None,
            progress: true,
        }
    }
}

impl RunOptions {
    pub fn with_user_name(mut self, user: impl AsRef<str>) -> Self {
        let u = user.as_ref().trim();
        self.user_name = u.strip_prefix('@').unwrap_or(u).to_string();
        self
    }
    pub fn with_credentials_path(mut self, path: impl AsRef<Path>) -> Self {
        self.credentials_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
    pub fn with_key_prefixes(mut self, raw: impl Into<String>, tsv: impl Into<String>) -> Self {
        self.raw_prefix = raw.into();
        self.tsv_prefix = tsv.into();
        self
    }
    pub fn with_run_zone(mut self, zone: Tz) -> Self {
        self.run_zone = zone;
        self
    }
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }
    pub fn with_page_size(mut self, n: u32) -> Self {
        self.page_size = n.clamp(1, 200);
        self
    }
    pub fn with_s3_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.s3_endpoint = Some(endpoint.into());
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    /// Apply overrides from the environment:
    /// - TETL_CREDENTIALS_FILE: path to the credential JSON
    /// - TETL_OUT_DIR: directory for the local artifacts
    /// - TETL_API_BASE: API root (e.g. a local mock)
    /// - TETL_S3_ENDPOINT: custom S3 endpoint (e.g. LocalStack)
    /// Blank values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        if let Some(p) = var("TETL_CREDENTIALS_FILE") {
            self = self.with_credentials_path(p);
        }
        if let Some(d) = var("TETL_OUT_DIR") {
            self = self.with_out_dir(d);
        }
        if let Some(b) = var("TETL_API_BASE") {
            self = self.with_api_base(b);
        }
        if let Some(e) = var("TETL_S3_ENDPOINT") {
            self = self.with_s3_endpoint(e);
        }
        self
    }

    /// Reject options that would only fail later, halfway through a run.
    pub fn validate(&self) -> Result<()> {
        static SCREEN_NAME: OnceLock<Regex> = OnceLock::new();
        let re = SCREEN_NAME.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("screen name pattern is valid")
        });
        if !re.is_match(&self.user_name) {
            return Err(ConfigError::Invalid(format!("invalid account name {:?}", self.user_name)).into());
        }
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("bucket is required".into()).into());
        }
        Ok(())
    }
}

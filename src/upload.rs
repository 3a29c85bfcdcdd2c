//! Object-store sink: push a local file to a bucket under a fully-qualified key.

use crate::config::RunOptions;
use crate::error::{Result, TetlError};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `local` to `bucket/key`, replacing any existing object.
    async fn upload_file(&self, local: &Path, bucket: &str, key: &str) -> Result<()>;
}

/// Amazon S3 (or an S3-compatible endpoint).
#[derive(Clone, Debug)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client for the configured region, using the default credential chain.
    /// A custom endpoint switches to path-style addressing.
    pub async fn connect(opts: &RunOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(opts.region.clone()));
        if let Some(endpoint) = &opts.s3_endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let builder = aws_sdk_s3::config::Builder::from(&shared);
        let conf = if opts.s3_endpoint.is_some() {
            builder.force_path_style(true).build()
        } else {
            builder.build()
        };
        tracing::debug!(region = %opts.region, endpoint = ?opts.s3_endpoint, "S3 client ready");
        Self::new(Client::from_conf(conf))
    }
}

fn content_type_for(local: &Path) -> &'static str {
    match local.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json",
        Some("tsv") => "text/tab-separated-values; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload_file(&self, local: &Path, bucket: &str, key: &str) -> Result<()> {
        let fail = |reason: String| TetlError::Upload {
            local: local.to_path_buf(),
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason,
        };

        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| fail(e.to_string()))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type_for(local))
            .body(body)
            .send()
            .await
            .map_err(|e| fail(DisplayErrorContext(&e).to_string()))?;

        tracing::info!("uploaded {} to s3://{}/{}", local.display(), bucket, key);
        Ok(())
    }
}

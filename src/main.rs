use anyhow::{Context, Result};
use tetl::{init_tracing_once, TimelineEtl};

const TWITTER_USER_NAME: &str = "VRmatkalla"; // VR Group
const BUCKET_NAME: &str = "minerva-test-integration-in-snowpipe-demo";
const REGION: &str = "eu-west-1";
const CREDENTIALS_FILE: &str = "twitter_keys.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing_once();

    let summary = TimelineEtl::new()
        .user_name(TWITTER_USER_NAME)
        .bucket(BUCKET_NAME)
        .region(REGION)
        .credentials_path(CREDENTIALS_FILE)
        .env_overrides()
        .execute()
        .await
        .with_context(|| format!("timeline run for {TWITTER_USER_NAME} failed"))?;

    tracing::info!(
        json = %summary.json_key,
        tsv = %summary.tsv_key,
        "run complete"
    );
    Ok(())
}

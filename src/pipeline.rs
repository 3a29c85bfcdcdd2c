use crate::config::{Credentials, RunOptions};
use crate::error::Result;
use crate::json_file::write_json_file;
use crate::normalize::{Record, RecordSet};
use crate::paths::RunIds;
use crate::progress::ProgressScope;
use crate::source::{PostSource, TwitterClient};
use crate::tsv::write_tsv_file;
use crate::upload::{ObjectStore, S3Store};
use crate::util::init_tracing_once;
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};

/// One configured run for one target account.
#[derive(Clone, Debug, Default)]
pub struct TimelineEtl {
    pub(crate) opts: RunOptions,
}

/// What a completed run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub user_name: String,
    pub records: usize,
    pub reshares_skipped: u64,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
    pub json_key: String,
    pub tsv_key: String,
}

/// The single console line a run prints.
pub fn summary_line(user: &str, count: usize) -> String {
    format!("{user} - {count} Tweets")
}

impl TimelineEtl {
    pub fn new() -> Self {
        Self { opts: RunOptions::default() }
    }

    pub fn from_options(opts: RunOptions) -> Self {
        Self { opts }
    }

    // -------- Builder methods --------
    pub fn user_name(mut self, user: impl AsRef<str>) -> Self { self.opts = self.opts.with_user_name(user); self }
    pub fn credentials_path(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_credentials_path(path); self }
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_out_dir(dir); self }
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self { self.opts = self.opts.with_bucket(bucket); self }
    pub fn region(mut self, region: impl Into<String>) -> Self { self.opts = self.opts.with_region(region); self }
    pub fn key_prefixes(mut self, raw: impl Into<String>, tsv: impl Into<String>) -> Self { self.opts = self.opts.with_key_prefixes(raw, tsv); self }
    pub fn run_zone(mut self, zone: Tz) -> Self { self.opts = self.opts.with_run_zone(zone); self }
    pub fn api_base(mut self, base: impl Into<String>) -> Self { self.opts = self.opts.with_api_base(base); self }
    pub fn page_size(mut self, n: u32) -> Self { self.opts = self.opts.with_page_size(n); self }
    pub fn s3_endpoint(mut self, endpoint: impl Into<String>) -> Self { self.opts = self.opts.with_s3_endpoint(endpoint); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn env_overrides(mut self) -> Self { self.opts = self.opts.with_env_overrides(); self }

    pub fn options(&self) -> &RunOptions {
        &self.opts
    }

    /// Full production run: credentials -> signed API client -> S3 client -> [`run`](Self::run).
    pub async fn execute(self) -> Result<RunSummary> {
        init_tracing_once();
        self.opts.validate()?;
        let creds = Credentials::load(&self.opts.credentials_path)?;
        let source = TwitterClient::new(creds, &self.opts)?;
        let store = S3Store::connect(&self.opts).await;
        self.run(&source, &store).await
    }

    /// Run against explicit stages, naming artifacts after the current time.
    pub async fn run<S, O>(&self, source: &S, store: &O) -> Result<RunSummary>
    where
        S: PostSource + ?Sized,
        O: ObjectStore + ?Sized,
    {
        self.run_with_ids(source, store, RunIds::now(&self.opts)).await
    }

    /// Run with pre-derived identifiers. Steps execute strictly in order and the
    /// first failure aborts; artifacts already written or uploaded are left in place.
    pub async fn run_with_ids<S, O>(&self, source: &S, store: &O, ids: RunIds) -> Result<RunSummary>
    where
        S: PostSource + ?Sized,
        O: ObjectStore + ?Sized,
    {
        init_tracing_once();
        self.opts.validate()?;
        let user = self.opts.user_name.as_str();
        tracing::info!(user, stamp = %ids.stamp, "starting run");

        let set = self.collect(source).await?;
        let reshares = set.reshares();
        let records = set.into_records();

        println!("{}", summary_line(user, records.len()));
        tracing::info!(user, kept = records.len(), reshares, "timeline drained");

        fs::create_dir_all(&self.opts.out_dir)
            .map_err(|e| crate::error::TetlError::io(&self.opts.out_dir, e))?;

        write_json_file(&records, &ids.json_path)?;
        store.upload_file(&ids.json_path, &self.opts.bucket, &ids.json_key).await?;

        write_tsv_file(&records, &ids.tsv_path)?;
        store.upload_file(&ids.tsv_path, &self.opts.bucket, &ids.tsv_key).await?;

        Ok(RunSummary {
            user_name: user.to_string(),
            records: records.len(),
            reshares_skipped: reshares,
            json_path: ids.json_path,
            tsv_path: ids.tsv_path,
            json_key: ids.json_key,
            tsv_key: ids.tsv_key,
        })
    }

    /// Drain every page of the target's timeline through the re-share filter and normalizer.
    pub async fn collect<S>(&self, source: &S) -> Result<RecordSet>
    where
        S: PostSource + ?Sized,
    {
        let user = self.opts.user_name.as_str();
        let progress = ProgressScope::new(self.opts.progress, format!("Fetching @{user}"));

        let mut set = RecordSet::new(user);
        let mut cursor = None;
        let mut pages = 0u64;
        loop {
            let page = source.fetch_page(user, cursor).await?;
            pages += 1;
            progress.inc_items(page.posts.len() as u64);
            for post in &page.posts {
                set.push(post);
            }
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        progress.finish("done");

        tracing::debug!(pages, seen = set.seen(), "pagination finished");
        Ok(set)
    }

    /// Convenience for callers that only want the normalized records.
    pub async fn collect_records<S>(&self, source: &S) -> Result<Vec<Record>>
    where
        S: PostSource + ?Sized,
    {
        Ok(self.collect(source).await?.into_records())
    }
}

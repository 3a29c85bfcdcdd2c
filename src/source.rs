//! Post source: an explicit page-at-a-time view of one account's timeline.

use crate::config::{Credentials, RunOptions};
use crate::error::{Result, TetlError};
use crate::json_utils::post_id;
use crate::oauth::{Nonce, Signer};
use async_trait::async_trait;
use serde_json::Value;

/// Continuation token: fetch posts with ids at or below this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor(pub u64);

/// One page of raw posts plus where to continue. `next == None` ends the stream.
#[derive(Clone, Debug, Default)]
pub struct Page {
    pub posts: Vec<Value>,
    pub next: Option<PageCursor>,
}

impl Page {
    /// Build a page from a batch, deriving the cursor from the smallest id seen.
    /// An empty batch, or one with no readable ids, is the last page.
    pub fn from_posts(posts: Vec<Value>) -> Self {
        let next = posts
            .iter()
            .filter_map(post_id)
            .min()
            .and_then(|min| min.checked_sub(1))
            .map(PageCursor);
        if next.is_none() && !posts.is_empty() {
            tracing::warn!("page of {} posts carried no usable ids; treating as last page", posts.len());
        }
        Self { posts, next }
    }
}

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the page of `user`'s posts starting at `cursor` (newest first when `None`).
    async fn fetch_page(&self, user: &str, cursor: Option<PageCursor>) -> Result<Page>;
}

pub const USER_TIMELINE_PATH: &str = "/1.1/statuses/user_timeline.json";

/// Signed client for the v1.1 user timeline endpoint.
pub struct TwitterClient {
    http: reqwest::Client,
    signer: Signer,
    api_base: String,
    page_size: u32,
}

impl TwitterClient {
    pub fn new(creds: Credentials, opts: &RunOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tetl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TetlError::Source(format!("building HTTP client: {e}")))?;
        Ok(Self {
            http,
            signer: Signer::new(creds),
            api_base: opts.api_base.trim_end_matches('/').to_string(),
            page_size: opts.page_size,
        })
    }

    fn timeline_url(&self) -> String {
        format!("{}{}", self.api_base, USER_TIMELINE_PATH)
    }
}

#[async_trait]
impl PostSource for TwitterClient {
    async fn fetch_page(&self, user: &str, cursor: Option<PageCursor>) -> Result<Page> {
        let url = self.timeline_url();
        let mut params = vec![
            ("screen_name", user.to_string()),
            ("count", self.page_size.to_string()),
        ];
        if let Some(PageCursor(max_id)) = cursor {
            params.push(("max_id", max_id.to_string()));
        }
        let auth = self.signer.authorization("GET", &url, &params, &Nonce::fresh());

        tracing::debug!(user, ?cursor, "GET {url}");
        let resp = self
            .http
            .get(&url)
            .query(&params)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| TetlError::Source(format!("GET {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TetlError::Source(format!("GET {url} returned {status}: {body}")));
        }

        let posts: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| TetlError::Source(format!("decoding timeline page: {e}")))?;
        tracing::debug!("received {} posts", posts.len());
        Ok(Page::from_posts(posts))
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tetl::{ObjectStore, Page, PageCursor, PostSource, Result, TetlError};

/// A raw post shaped like a v1.1 timeline entry, authored by `screen_name`.
pub fn make_post(id: u64, text: &str, created_at: &str, screen_name: &str) -> Value {
    json!({
        "created_at": created_at,
        "id": id,
        "id_str": id.to_string(),
        "text": text,
        "source": "<a href=\"https://mobile.twitter.com\">Twitter Web App</a>",
        "geo": null,
        "coordinates": null,
        "lang": "fi",
        "retweet_count": 3,
        "favorite_count": 5,
        "favorited": false,
        "retweeted": false,
        "user": {
            "id": 42,
            "name": "VR Group",
            "screen_name": screen_name,
            "location": "Helsinki",
            "description": "Trains",
            "url": null,
            "followers_count": 1000,
            "friends_count": 10,
            "listed_count": 7,
            "created_at": "Mon Mar 02 10:00:00 +0000 2009",
            "favourites_count": 12,
            "utc_offset": null,
            "time_zone": null,
            "geo_enabled": true,
            "verified": true,
            "statuses_count": 5000,
            "lang": null,
            "profile_background_color": "C0DEED",
            "profile_image_url": "http://pbs.twimg.com/profile_images/1/a.png",
            "default_profile": false,
            "default_profile_image": false,
            "following": null
        }
    })
}

/// The three-post scenario: one re-share and two originals, newest first.
pub fn three_posts(user: &str) -> Vec<Value> {
    vec![
        make_post(300, "RT @alice: hi", "Wed Oct 10 20:19:24 +0000 2018", user),
        make_post(200, "hello\nworld", "Tue Oct 09 08:00:00 +0000 2018", user),
        make_post(100, "second post", "Mon Oct 08 07:30:15 +0000 2018", user),
    ]
}

/// In-memory source serving fixed batches; each batch becomes one page.
pub struct FakeSource {
    pages: Vec<Vec<Value>>,
    pub calls: Mutex<Vec<(String, Option<PageCursor>)>>,
    fail_at: Option<usize>,
}

impl FakeSource {
    pub fn new(pages: Vec<Vec<Value>>) -> Self {
        Self { pages, calls: Mutex::new(Vec::new()), fail_at: None }
    }

    /// Serve pages normally, then fail on call number `n` (0-based).
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn cursors(&self) -> Vec<Option<PageCursor>> {
        self.calls.lock().unwrap().iter().map(|(_, c)| *c).collect()
    }
}

#[async_trait]
impl PostSource for FakeSource {
    async fn fetch_page(&self, user: &str, cursor: Option<PageCursor>) -> Result<Page> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((user.to_string(), cursor));
            calls.len() - 1
        };
        if self.fail_at == Some(n) {
            return Err(TetlError::Source("connection reset".into()));
        }
        let batch = self.pages.get(n).cloned().unwrap_or_default();
        let mut page = Page::from_posts(batch);
        if n + 1 >= self.pages.len() {
            page.next = None;
        }
        Ok(page)
    }
}

/// Object store that records uploads in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<Vec<(String, String, Vec<u8>)>>,
    fail_keys_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject uploads whose key starts with `prefix`.
    pub fn failing_for(prefix: &str) -> Self {
        Self { objects: Mutex::new(Vec::new()), fail_keys_with: Some(prefix.to_string()) }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().iter().map(|(_, k, _)| k.clone()).collect()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|(_, k, _)| k == key)
            .map(|(_, _, b)| b.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload_file(&self, local: &Path, bucket: &str, key: &str) -> Result<()> {
        if let Some(prefix) = &self.fail_keys_with {
            if key.starts_with(prefix.as_str()) {
                return Err(TetlError::Upload {
                    local: local.to_path_buf(),
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    reason: "access denied".into(),
                });
            }
        }
        let bytes = fs::read(local).map_err(|e| TetlError::Source(e.to_string()))?;
        self.objects.lock().unwrap().push((bucket.to_string(), key.to_string(), bytes));
        Ok(())
    }
}

/// Read a text file line-by-line (keeps empty lines out).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

pub fn write_credentials(dir: &Path, body: &str) -> PathBuf {
    let p = dir.join("twitter_keys.json");
    fs::write(&p, body).unwrap();
    p
}

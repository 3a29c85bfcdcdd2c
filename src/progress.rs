//! Progress reporting while draining the source: a spinner counting fetched posts.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for an unknown-length stream of items, with a label.
pub fn make_count_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos} posts  it/s: {per_sec}  elapsed: {elapsed_precise}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Optional spinner: every call is a no-op when progress is disabled.
pub struct ProgressScope {
    pb: Option<ProgressBar>,
}

impl ProgressScope {
    pub fn new(enabled: bool, label: impl AsRef<str>) -> Self {
        Self { pb: enabled.then(|| make_count_spinner(label.as_ref())) }
    }
    #[inline]
    pub fn inc_items(&self, delta: u64) {
        if let Some(pb) = &self.pb {
            pb.inc(delta);
        }
    }
    pub fn finish<T: Into<String>>(&self, msg: T) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(msg.into());
        }
    }
}

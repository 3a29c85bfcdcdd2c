use crate::config::RunOptions;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Output kind of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Json, // full normalized records
    Tsv,  // 4-column projection
}

impl ArtifactKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Json => "json",
            ArtifactKind::Tsv => "tsv",
        }
    }
}

/// Names derived once at the start of a run: stamp, local files, object keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunIds {
    pub stamp: String, // YYYY-MM-DD-HHMMSS in the run zone
    pub json_file: String,
    pub tsv_file: String,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
    pub json_key: String,
    pub tsv_key: String,
}

impl RunIds {
    pub fn now(opts: &RunOptions) -> Self {
        Self::at(Utc::now(), opts)
    }

    pub fn at(instant: DateTime<Utc>, opts: &RunOptions) -> Self {
        let stamp = instant
            .with_timezone(&opts.run_zone)
            .format("%Y-%m-%d-%H%M%S")
            .to_string();
        let json_file = file_name(&stamp, &opts.user_name, ArtifactKind::Json);
        let tsv_file = file_name(&stamp, &opts.user_name, ArtifactKind::Tsv);
        Self {
            json_path: opts.out_dir.join(&json_file),
            tsv_path: opts.out_dir.join(&tsv_file),
            json_key: object_key(&opts.raw_prefix, &json_file),
            tsv_key: object_key(&opts.tsv_prefix, &tsv_file),
            stamp,
            json_file,
            tsv_file,
        }
    }
}

pub fn file_name(stamp: &str, user: &str, kind: ArtifactKind) -> String {
    format!("{stamp}_{user}.{}", kind.extension())
}

pub fn object_key(prefix: &str, file: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        file.to_string()
    } else {
        format!("{prefix}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn opts() -> RunOptions {
        RunOptions::default()
            .with_user_name("VRmatkalla")
            .with_bucket("b")
            .with_out_dir("/tmp/out")
    }

    #[test]
    fn stamp_uses_helsinki_summer_time() {
        // 09:30 UTC is 12:30 EEST in July.
        let t = Utc.with_ymd_and_hms(2019, 7, 1, 9, 30, 5).unwrap();
        let ids = RunIds::at(t, &opts());
        assert_eq!(ids.stamp, "2019-07-01-123005");
        assert_eq!(ids.json_file, "2019-07-01-123005_VRmatkalla.json");
        assert_eq!(ids.tsv_file, "2019-07-01-123005_VRmatkalla.tsv");
        assert_eq!(ids.json_key, "data/raw/2019-07-01-123005_VRmatkalla.json");
        assert_eq!(ids.tsv_key, "data/tsv/2019-07-01-123005_VRmatkalla.tsv");
        assert_eq!(ids.json_path, PathBuf::from("/tmp/out/2019-07-01-123005_VRmatkalla.json"));
    }

    #[test]
    fn stamp_uses_helsinki_winter_time() {
        // 23:00 UTC on Dec 31 is already Jan 1 in EET (+02:00).
        let t = Utc.with_ymd_and_hms(2018, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(RunIds::at(t, &opts()).stamp, "2019-01-01-010000");
    }

    #[test]
    fn object_key_normalizes_slashes() {
        assert_eq!(object_key("data/raw/", "f.json"), "data/raw/f.json");
        assert_eq!(object_key("/data/tsv", "f.tsv"), "data/tsv/f.tsv");
        assert_eq!(object_key("", "f.tsv"), "f.tsv");
    }
}

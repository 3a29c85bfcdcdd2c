use crate::error::{Result, TetlError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

static INIT_ONCE: std::sync::Once = std::sync::Once::new();

/// Install the stderr `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
/// Later calls are no-ops.
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Sibling temp path used while a file is being written.
fn tmp_path_for(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// Write `bytes` to `dest` in one step: fill a temp sibling, sync, then rename over `dest`.
/// Readers never observe a half-written file. If the rename fails (e.g. across devices),
/// fall back to copy + remove.
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TetlError::io(parent, e))?;
    }
    let tmp = tmp_path_for(dest);
    {
        let mut f = File::create(&tmp).map_err(|e| TetlError::io(&tmp, e))?;
        f.write_all(bytes).map_err(|e| TetlError::io(&tmp, e))?;
        f.sync_all().map_err(|e| TetlError::io(&tmp, e))?;
    }
    if let Err(e) = fs::rename(&tmp, dest) {
        tracing::debug!("rename {} -> {} failed ({e}); copying", tmp.display(), dest.display());
        fs::copy(&tmp, dest).map_err(|e| TetlError::io(dest, e))?;
        fs::remove_file(&tmp).map_err(|e| TetlError::io(&tmp, e))?;
    }
    Ok(())
}

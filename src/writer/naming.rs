//! Collision-avoiding output file naming
//!
//! When overwrite is not forced, an occupied output name gets a numeric
//! suffix before the extension: `out.yaml`, `out(1).yaml`, `out(2).yaml`, …
//! The scan is a plain existence-check loop; a concurrent process creating
//! the same names can still race it (accepted limitation).

use std::path::{Path, PathBuf};

/// Return `path` itself when free, else the first suffixed variant that
/// does not name an existing file.
pub fn collision_free(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let ext = path.extension().and_then(|e| e.to_str());

    let mut n: u32 = 1;
    loop {
        let name = match ext {
            Some(ext) => format!("{}({}).{}", stem, n, ext),
            None => format!("{}({})", stem, n),
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

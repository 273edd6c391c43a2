//! Image asset resolution shared by the images validator and the blur fixer.
//!
//! Frontmatter image fields hold either a site-absolute path (`/images/x.jpg`,
//! resolved under `public/`) or an `http(s)` URL fetched over the network.
//! Failures are reported as plain strings; callers downgrade them to warnings
//! so one unreachable asset never fails an otherwise-fine document.

use std::fs;
use std::path::{Path, PathBuf};

/// Whether the declared source is a remote URL.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolve a site-absolute asset path to its on-disk location.
pub fn resolve_asset_path(root: &Path, source: &str) -> PathBuf {
    root.join("public").join(source.trim_start_matches('/'))
}

/// Load the bytes behind a declared image source, local or remote.
pub fn load_asset_bytes(root: &Path, source: &str) -> Result<Vec<u8>, String> {
    if is_remote(source) {
        return fetch_remote(source);
    }

    let path = resolve_asset_path(root, source);
    fs::read(&path).map_err(|err| format!("failed to read {}: {err}", path.display()))
}

fn fetch_remote(url: &str) -> Result<Vec<u8>, String> {
    let response = reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|err| format!("failed to fetch {url}: {err}"))?;
    response
        .bytes()
        .map(|bytes| bytes.to_vec())
        .map_err(|err| format!("failed to fetch {url}: {err}"))
}

//! Version check — compare the running version with the published one.
//!
//! The published version is a plain-text file holding a single version
//! string.  Fetching is behind the `version-check` feature flag.  Results
//! are cached for 24 hours in `~/.config/securevault/version-check.json`.
//! Never fails: on any error the latest version is reported as the current
//! one.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the latest published version string lives.
pub const VERSION_URL: &str = "https://raw.githubusercontent.com/MushhDev/db/main/version.txt";

/// How long to cache the version check result.
const CACHE_TTL_HOURS: i64 = 24;

/// Outcome of a version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateInfo {
    pub current: String,
    pub latest: String,
    pub update_available: bool,
}

impl UpdateInfo {
    fn new(current: &str, latest: String) -> Self {
        Self {
            update_available: latest != current,
            current: current.to_string(),
            latest,
        }
    }
}

/// Cached version check result.
#[derive(Serialize, Deserialize)]
struct CachedVersion {
    latest: String,
    checked_at: DateTime<Utc>,
}

/// Check for a newer published version than `current`.
pub fn check_updates(current: &str) -> UpdateInfo {
    if let Some(cached) = read_cache() {
        let age = Utc::now() - cached.checked_at;
        if age.num_hours() < CACHE_TTL_HOURS {
            return UpdateInfo::new(current, cached.latest);
        }
    }

    match fetch_latest_version() {
        Some(latest) => {
            // Cache the result (fire-and-forget).
            let _ = write_cache(&latest);
            UpdateInfo::new(current, latest)
        }
        None => UpdateInfo::new(current, current.to_string()),
    }
}

/// Fetch the published version string.
#[cfg(feature = "version-check")]
fn fetch_latest_version() -> Option<String> {
    let mut resp = ureq::get(VERSION_URL)
        .header(
            "User-Agent",
            &format!("securevault/{}", env!("CARGO_PKG_VERSION")),
        )
        .call()
        .map_err(|e| tracing::debug!(error = %e, "version check request failed"))
        .ok()?;

    let body = resp.body_mut().read_to_string().ok()?;
    parse_version(&body)
}

#[cfg(not(feature = "version-check"))]
fn fetch_latest_version() -> Option<String> {
    None
}

/// The first non-empty line, trimmed.
fn parse_version(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Path to the cache file.
fn cache_path() -> Option<PathBuf> {
    let config_dir = config_dir()?;
    Some(config_dir.join("version-check.json"))
}

/// `$HOME/.config/securevault` on all platforms.
fn config_dir() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(PathBuf::from(home).join(".config").join("securevault"))
}

fn read_cache() -> Option<CachedVersion> {
    let path = cache_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn write_cache(version: &str) -> Option<()> {
    let path = cache_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }

    let cached = CachedVersion {
        latest: version.to_string(),
        checked_at: Utc::now(),
    };

    let content = serde_json::to_string_pretty(&cached).ok()?;
    fs::write(path, content).ok()?;

    Some(())
}

//! Install prefix resolution

use std::path::{Path, PathBuf};

/// Resolve the install prefix.
///
/// An explicit prefix wins, then `BREWLET_PREFIX`, then `HOMEBREW_PREFIX`,
/// then the architecture default Homebrew uses. Empty values count as unset.
pub fn detect_prefix(explicit: Option<&Path>) -> PathBuf {
    let brewlet = std::env::var("BREWLET_PREFIX").ok();
    let homebrew = std::env::var("HOMEBREW_PREFIX").ok();
    resolve_prefix(explicit, brewlet.as_deref(), homebrew.as_deref())
}

fn resolve_prefix(
    explicit: Option<&Path>,
    brewlet_prefix: Option<&str>,
    homebrew_prefix: Option<&str>,
) -> PathBuf {
    if let Some(prefix) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return prefix.to_path_buf();
    }

    [brewlet_prefix, homebrew_prefix]
        .into_iter()
        .flatten()
        .find(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_prefix)
}

fn default_prefix() -> PathBuf {
    #[cfg(target_arch = "aarch64")]
    {
        PathBuf::from("/opt/homebrew")
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        PathBuf::from("/usr/local")
    }
}

/// Directory executables are installed into
pub fn bin_dir(prefix: &Path) -> PathBuf {
    prefix.join("bin")
}

//! Atomic placement of verified artifacts into the prefix.
//!
//! Content is written to a temporary file inside the destination directory,
//! flushed, marked executable and then renamed over the destination. The
//! rename is atomic on the same filesystem, so a reader of the destination
//! sees either the previous artifact or the complete new one. On any error
//! the temporary file is removed when it is dropped.

use crate::error::InstallError;
use crate::manifest::Manifest;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Permission bits for installed artifacts (rwxr-xr-x)
#[cfg(unix)]
const EXECUTABLE_MODE: u32 = 0o755;

/// Where `manifest`'s artifact lives under `bin_dir`
pub fn destination(manifest: &Manifest, bin_dir: &Path) -> PathBuf {
    bin_dir.join(&manifest.install_target_name)
}

/// Write `bytes` to `dest` with executable permissions.
///
/// Re-running with the same inputs replaces the file and leaves an
/// identical final state. The parent directory is created if needed.
pub fn install(bytes: &[u8], dest: &Path) -> Result<(), InstallError> {
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| InstallError::io(dir, e))?;

    if dest.is_dir() {
        return Err(InstallError::io(
            dest,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "destination is a directory",
            ),
        ));
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".brewlet-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| InstallError::io(dir, e))?;

    write_executable(&mut tmp, bytes).map_err(|e| InstallError::io(tmp.path(), e))?;

    tmp.persist(dest)
        .map_err(|e| InstallError::io(dest, e.error))?;

    tracing::debug!(dest = %dest.display(), bytes = bytes.len(), "installed artifact");
    Ok(())
}

fn write_executable(tmp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(EXECUTABLE_MODE))?;
    }

    Ok(())
}

/// Remove an installed artifact.
///
/// Returns `false` when there was nothing to remove.
pub fn uninstall(dest: &Path) -> Result<bool, InstallError> {
    match fs::remove_file(dest) {
        Ok(()) => {
            tracing::debug!(dest = %dest.display(), "removed artifact");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(InstallError::io(dest, e)),
    }
}

/// Whether an artifact file is present at `dest`
pub fn is_installed(dest: &Path) -> bool {
    dest.is_file()
}

/// Declared version of an installed artifact.
///
/// `None` when the artifact is absent or the manifest is unversioned.
pub fn installed_version<'a>(manifest: &'a Manifest, bin_dir: &Path) -> Option<&'a str> {
    if !is_installed(&destination(manifest, bin_dir)) {
        return None;
    }
    manifest.declared_version()
}

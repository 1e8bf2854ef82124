//! The install pipeline: validate → fetch → verify → install → caveats.
//!
//! Each stage runs to completion before the next starts and the first
//! failure aborts the run. Nothing touches the filesystem until the fetched
//! bytes have been verified, so a failed run leaves the previous install
//! (if any) in place.

use crate::caveats;
use crate::checksum;
use crate::download::Fetcher;
use crate::error::Result;
use crate::install;
use crate::manifest::Manifest;
use std::path::{Path, PathBuf};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub destination: PathBuf,
    pub bytes: usize,
    pub sha256: String,
    pub caveats: String,
    /// True when the run stopped after verification
    pub dry_run: bool,
}

/// Options that do not come from the manifest
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub dry_run: bool,
}

/// Run the full pipeline for `manifest`, installing into `bin_dir`.
#[tracing::instrument(name = "install", skip_all, fields(name = %manifest.name))]
pub async fn run<F: Fetcher>(
    manifest: &Manifest,
    fetcher: &F,
    bin_dir: &Path,
    options: Options,
) -> Result<Outcome> {
    manifest.validate()?;
    tracing::debug!("manifest valid");

    let bytes = fetcher.fetch(&manifest.source_url).await?;
    tracing::debug!(bytes = bytes.len(), "fetched");

    checksum::verify(&bytes, &manifest.expected_hash)?;
    tracing::debug!("checksum verified");

    let destination = install::destination(manifest, bin_dir);
    if options.dry_run {
        tracing::info!(dest = %destination.display(), "dry run, skipping install");
    } else {
        install::install(&bytes, &destination)?;
        tracing::info!(dest = %destination.display(), "installed");
    }

    Ok(Outcome {
        destination,
        bytes: bytes.len(),
        sha256: checksum::sha256_hex(&bytes),
        caveats: caveats::render_caveats(manifest),
        dry_run: options.dry_run,
    })
}

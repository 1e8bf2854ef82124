//! Library interface for brewlet
//!
//! Resolves a single-file formula manifest, downloads the artifact, checks
//! its SHA-256 and installs it atomically into the prefix's `bin/`.
//!
//! ```no_run
//! use brewlet::{HttpFetcher, Manifest, pipeline};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let manifest = Manifest::load(Path::new("brewlet.toml"))?;
//!     let fetcher = HttpFetcher::new(brewlet::download::DEFAULT_TIMEOUT)?;
//!     let outcome = pipeline::run(
//!         &manifest,
//!         &fetcher,
//!         Path::new("/usr/local/bin"),
//!         pipeline::Options::default(),
//!     )
//!     .await?;
//!     println!("{}", outcome.caveats);
//!     Ok(())
//! }
//! ```

pub mod caveats;
pub mod checksum;
pub mod colors;
pub mod download;
pub mod error;
pub mod install;
pub mod manifest;
pub mod pipeline;
pub mod prefix;

// Re-export commonly used items
pub use caveats::render_caveats;
pub use checksum::verify;
pub use download::{Fetcher, HttpFetcher};
pub use error::{BrewletError, FetchError, InstallError, IntegrityError, ValidationError};
pub use manifest::Manifest;

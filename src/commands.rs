//! Command implementations for the `brewlet` binary

use brewlet::caveats;
use brewlet::download::HttpFetcher;
use brewlet::error::{BrewletError, FetchError, Result};
use brewlet::install;
use brewlet::manifest::Manifest;
use brewlet::pipeline::{self, Options};
use brewlet::prefix;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// Settings shared by every command
pub struct Context {
    pub prefix: PathBuf,
    pub timeout: Duration,
}

impl Context {
    pub fn bin_dir(&self) -> PathBuf {
        prefix::bin_dir(&self.prefix)
    }
}

fn load(path: &Path) -> Result<Manifest> {
    Manifest::load(path).map_err(BrewletError::Manifest)
}

pub async fn install(ctx: &Context, manifest_path: &Path, dry_run: bool) -> Result<ExitCode> {
    let manifest = load(manifest_path)?;

    println!("{} {}", "==>".bold().green(), format!("Installing {}", manifest.name).bold());
    if dry_run {
        println!("Dry run mode - nothing will be written");
    }

    let fetcher = HttpFetcher::new(ctx.timeout)?;
    let bin_dir = ctx.bin_dir();

    // Only the fetch awaits; verify and the rename run within one poll, so
    // Ctrl-C can abort the download but never a half-finished install.
    let outcome = tokio::select! {
        outcome = pipeline::run(&manifest, &fetcher, &bin_dir, Options { dry_run }) => outcome?,
        _ = tokio::signal::ctrl_c() => {
            return Err(FetchError::NetworkError {
                url: manifest.source_url.clone(),
                reason: "interrupted".to_string(),
            }
            .into());
        }
    };

    if outcome.dry_run {
        println!(
            "  {} Verified {} ({} bytes), would install to {}",
            "✓".green(),
            manifest.name.bold(),
            outcome.bytes,
            outcome.destination.display().to_string().cyan()
        );
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "  {} Installed {} → {}",
        "✓".green(),
        manifest.install_target_name.bold(),
        outcome.destination.display().to_string().cyan()
    );
    println!();
    println!("{}", "==> Caveats".bold().yellow());
    print!("{}", outcome.caveats);
    if !outcome.caveats.ends_with('\n') {
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

pub fn uninstall(ctx: &Context, manifest_path: &Path) -> Result<ExitCode> {
    let manifest = load(manifest_path)?;
    manifest.validate()?;

    let dest = install::destination(&manifest, &ctx.bin_dir());
    if install::uninstall(&dest)? {
        println!(
            "  {} Uninstalled {} from {}",
            "✓".green(),
            manifest.install_target_name.bold(),
            dest.display()
        );
    } else {
        println!(
            "  {} {} is not installed",
            "⚠".yellow(),
            manifest.install_target_name.bold()
        );
    }

    Ok(ExitCode::SUCCESS)
}

pub fn info(ctx: &Context, manifest_path: &Path) -> Result<ExitCode> {
    let manifest = load(manifest_path)?;
    manifest.validate()?;

    let dest = install::destination(&manifest, &ctx.bin_dir());
    let version = manifest.declared_version().unwrap_or("unversioned");

    println!("{} {}", manifest.name.bold().green(), version.dimmed());
    if !manifest.description.is_empty() {
        println!("{}", manifest.description);
    }
    if !manifest.homepage.is_empty() {
        println!("{}", manifest.homepage.blue().underline());
    }
    println!();
    println!("  {}: {}", "Source".dimmed(), manifest.source_url);
    println!("  {}: {}", "SHA-256".dimmed(), manifest.expected_hash.trim());
    println!("  {}: {}", "Destination".dimmed(), dest.display().to_string().cyan());

    let status = if install::is_installed(&dest) {
        "installed".green().to_string()
    } else {
        "not installed".yellow().to_string()
    };
    println!("  {}: {}", "Status".dimmed(), status);

    Ok(ExitCode::SUCCESS)
}

pub fn show_caveats(manifest_path: &Path) -> Result<ExitCode> {
    let manifest = load(manifest_path)?;
    manifest.validate()?;

    print!("{}", caveats::render_caveats(&manifest));
    Ok(ExitCode::SUCCESS)
}

pub fn config(ctx: &Context) -> Result<ExitCode> {
    println!("{}", "==> Configuration".bold().green());
    println!();
    println!("  {}: {}", "Prefix".dimmed(), ctx.prefix.display().to_string().cyan());
    println!("  {}: {}", "Bin".dimmed(), ctx.bin_dir().display().to_string().cyan());
    println!("  {}: {}s", "Timeout".dimmed(), ctx.timeout.as_secs());
    println!("  {}: {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
    println!("  {}: {}", "Architecture".dimmed(), std::env::consts::ARCH.cyan());
    println!("  {}: {}", "OS".dimmed(), std::env::consts::OS.cyan());

    Ok(ExitCode::SUCCESS)
}

/// Print the installed artifact's declared version.
///
/// Exits 1 when the manifest is unversioned or nothing is installed.
pub fn version(ctx: &Context, manifest_path: &Path) -> ExitCode {
    let manifest = match load(manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = manifest.validate() {
        eprintln!("{} {}", "error:".red().bold(), e);
        return ExitCode::FAILURE;
    }

    match install::installed_version(&manifest, &ctx.bin_dir()) {
        Some(version) => {
            println!("{version}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!(
                "{} is not installed or declares no version",
                manifest.name.bold()
            );
            ExitCode::FAILURE
        }
    }
}

mod commands;

use brewlet::colors;
use brewlet::download::DEFAULT_TIMEOUT;
use brewlet::prefix;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "brewlet")]
#[command(
    author,
    about = "Install single-file scripts from checksummed manifests",
    long_about = None,
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print the installed artifact's declared version (exit 1 if none)
    #[arg(short = 'V', long)]
    version: bool,

    /// Manifest consulted by --version
    #[arg(long, default_value = "brewlet.toml")]
    manifest: PathBuf,

    /// Install prefix (artifacts go to <prefix>/bin); defaults to
    /// BREWLET_PREFIX, then HOMEBREW_PREFIX
    #[arg(long, global = true)]
    prefix: Option<PathBuf>,

    /// Download timeout in seconds
    #[arg(
        long,
        global = true,
        env = "BREWLET_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, verify and install the artifact described by a manifest
    Install {
        /// Path to the manifest (.json or .toml)
        manifest: PathBuf,

        /// Verify without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove an installed artifact
    Uninstall {
        /// Path to the manifest
        manifest: PathBuf,
    },

    /// Show manifest details and install status
    Info {
        /// Path to the manifest
        manifest: PathBuf,
    },

    /// Print the post-install caveats
    Caveats {
        /// Path to the manifest
        manifest: PathBuf,
    },

    /// Show resolved configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    colors::init_colors();

    let ctx = commands::Context {
        prefix: prefix::detect_prefix(cli.prefix.as_deref()),
        timeout: Duration::from_secs(cli.timeout),
    };

    if cli.version {
        return commands::version(&ctx, &cli.manifest);
    }

    let result = match cli.command {
        Some(Commands::Install { manifest, dry_run }) => {
            commands::install(&ctx, &manifest, dry_run).await
        }
        Some(Commands::Uninstall { manifest }) => commands::uninstall(&ctx, &manifest),
        Some(Commands::Info { manifest }) => commands::info(&ctx, &manifest),
        Some(Commands::Caveats { manifest }) => commands::show_caveats(&manifest),
        Some(Commands::Config) => commands::config(&ctx),
        None => {
            println!("{} - install scripts from checksummed manifests", "brewlet".bold());
            println!("\nRun {} to see available commands.", "brewlet --help".cyan());
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", format!("error[{}]:", e.kind()).red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

//! xim - cross-platform package manager CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "xim")]
#[command(author, version, about = "xim - a cross-platform package manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search available packages
    Search {
        /// Search query (substring of the package name)
        query: String,
    },
    /// List installed packages
    List {
        /// Only show packages whose name contains this substring
        filter: Option<String>,
    },
    /// Show package info
    Info {
        /// Package spec: pkg or pkg@version
        package: String,
    },
    /// Install packages
    Install {
        /// Package spec(s): pkg or pkg@version
        #[arg(required = true)]
        targets: Vec<String>,
        /// Target platform id (linux, macosx, windows); default is the host
        #[arg(long)]
        platform: Option<String>,
        /// Maximum simultaneous downloads
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
        /// Retry attempts per download after a transport failure
        #[arg(long)]
        retries: Option<u32>,
        /// Mirror base URL replacing each artifact's scheme and host
        #[arg(long)]
        mirror: Option<String>,
        /// Print the resolved plan without installing
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove an installed package
    Uninstall {
        /// Package name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search { query } => cmd::search::search(&query),
        Commands::List { filter } => cmd::list::list(filter.as_deref()),
        Commands::Info { package } => cmd::info::info(&package),
        Commands::Install {
            targets,
            platform,
            jobs,
            retries,
            mirror,
            dry_run,
        } => {
            cmd::install::install(
                &targets,
                cmd::install::InstallOpts {
                    platform,
                    jobs,
                    retries,
                    mirror,
                    dry_run,
                },
            )
            .await
        }
        Commands::Uninstall { name } => cmd::uninstall::uninstall(&name),
    }
}

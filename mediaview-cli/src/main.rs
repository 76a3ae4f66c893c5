use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod interactive;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "mediaview")]
#[command(about = "Media library explorer and read-only metadata filesystem")]
#[command(version = "0.1.0")]
struct Cli {
    /// Library root (defaults to $MEDIAVIEW_LIBRARY, then ~/Videos)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount the library's virtual view (blocks until unmounted)
    Mount {
        /// Empty directory to mount on
        mountpoint: PathBuf,
        /// Let other users access the mount
        #[arg(long)]
        allow_other: bool,
        /// Unmount automatically when the process exits
        #[arg(long)]
        auto_unmount: bool,
    },
    /// Show the virtual hierarchy as a tree
    Tree {
        /// Virtual path to start from
        #[arg(default_value = "/")]
        path: String,
        /// Maximum depth to show
        #[arg(short, long, default_value = "3")]
        depth: usize,
    },
    /// List the entries of a virtual directory
    Ls {
        /// Virtual path (e.g., "/Movies/byGenre")
        #[arg(default_value = "/")]
        path: String,
    },
    /// Show what a virtual path resolves to
    Resolve {
        /// Virtual path (e.g., "/Movies/byTitle/Heat/Heat.mkv")
        path: String,
    },
    /// Show library statistics
    Stats {
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Start interactive mode
    Interactive,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        utils::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.unwrap_or_else(config::get_library_dir);
    tracing::debug!(root = %root.display(), "library root");

    match cli.command {
        Some(Commands::Mount {
            mountpoint,
            allow_other,
            auto_unmount,
        }) => {
            commands::mount::execute(&root, &mountpoint, allow_other, auto_unmount)?;
        }
        Some(Commands::Tree { path, depth }) => {
            commands::tree::execute(&root, &path, depth)?;
        }
        Some(Commands::Ls { path }) => {
            commands::ls::execute(&root, &path)?;
        }
        Some(Commands::Resolve { path }) => {
            commands::resolve::execute(&root, &path)?;
        }
        Some(Commands::Stats { json }) => {
            commands::stats::execute(&root, json)?;
        }
        Some(Commands::Interactive) | None => {
            interactive::run(&root)?;
        }
    }

    Ok(())
}

pub mod check;
pub mod resolve;
pub mod translate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "javamap",
    version,
    about = "Maps a Java class library onto TypeScript type spellings",
    long_about = "javamap walks the whitelisted part of a Java class graph, starting from seed \
                  classes, and writes one JSON entry per reachable class with its members \
                  translated into TypeScript spellings and its overloads grouped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the class closure and write the class map
    Resolve {
        /// Options file (JSON)
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
        /// Where to write the class map; defaults to the configured output, then stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Serve class metadata from a JSON snapshot instead of the classpath
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
        /// Give up after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Also log to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check whether class names pass the configured whitelist
    Check {
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
        #[arg(value_name = "CLASS", required = true)]
        names: Vec<String>,
    },
    /// Translate type descriptors into TypeScript spellings
    Translate {
        /// Translate as return types instead of parameters
        #[arg(long = "return")]
        return_context: bool,
        /// Options file whose whitelist decides which classes keep their names
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(value_name = "DESCRIPTOR", required = true)]
        descriptors: Vec<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Resolve { verbose: true, .. });
    let _guard = javamap_core::logging::init_logging("cli", verbose);

    match cli.command {
        Commands::Resolve {
            config,
            output,
            snapshot,
            timeout_secs,
            ..
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            let args = resolve::ResolveArgs {
                config,
                output,
                snapshot,
                timeout: timeout_secs.map(Duration::from_secs),
            };
            let result = rt.block_on(resolve::run(args));
            // A timed-out resolution may still be running on a blocking thread.
            rt.shutdown_background();
            result
        }
        Commands::Check { config, names } => check::run(&config, &names),
        Commands::Translate {
            return_context,
            config,
            descriptors,
        } => translate::run(config.as_deref(), &descriptors, return_context),
    }
}

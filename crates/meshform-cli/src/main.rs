//! Meshform CLI - manage Istio networking resources with server-side apply

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;
mod exit_codes;

use commands::get::OutputFormat;

#[derive(Parser)]
#[command(name = "meshform")]
#[command(version)]
#[command(about = "Manage Istio networking resources with server-side apply", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the canonical YAML manifest for a resource document
    Render {
        /// Resource document (YAML)
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create or update a resource via server-side apply
    Apply {
        /// Resource document (YAML)
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Field manager name recorded for the apply
        #[arg(long, env = "MESHFORM_FIELD_MANAGER")]
        field_manager: Option<String>,

        /// Take ownership of fields held by other managers
        #[arg(long)]
        force_conflicts: bool,
    },

    /// Fetch a resource and print it
    Get {
        /// Resource kind (e.g. Gateway, virtualservices)
        kind: String,

        /// Composite identifier, namespace/name
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        output: OutputFormat,
    },

    /// Delete a resource
    Delete {
        /// Resource kind
        kind: String,

        /// Composite identifier, namespace/name
        id: String,
    },

    /// Seed local state for a resource that already exists on the cluster
    Import {
        /// Resource kind
        kind: String,

        /// Composite identifier, namespace/name
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Render { file, output } => commands::render::run(&file, output.as_deref()),

        Commands::Apply {
            file,
            field_manager,
            force_conflicts,
        } => commands::apply::run(&file, field_manager, force_conflicts).await,

        Commands::Get { kind, id, output } => commands::get::run(&kind, &id, output).await,

        Commands::Delete { kind, id } => commands::delete::run(&kind, &id).await,

        Commands::Import { kind, id } => commands::import::run(&kind, &id),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if debug { "meshform=debug" } else { "meshform=warn" };
    let filter =
        EnvFilter::try_from_env("MESHFORM_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Value stream map toolkit.
#[derive(Parser)]
#[command(name = "vsm", version, about = "Value stream map toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a value stream map JSON file and print it
    Parse {
        /// Path to the VSM JSON file
        file: PathBuf,
    },

    /// Validate a value stream map JSON file against the payload schema
    Validate {
        /// Path to the VSM JSON file
        file: PathBuf,
    },

    /// Resolve a page-meta JSON file to the entity it addresses
    Page {
        /// Path to the page-meta JSON file
        file: PathBuf,
        /// Also fetch the value stream map for the resolved entity
        #[arg(long)]
        fetch: bool,
        #[command(flatten)]
        server: ServerArgs,
    },

    /// Fetch a value stream map from the server
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
        #[command(flatten)]
        server: ServerArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum FetchTarget {
    /// Map centered on a pipeline run
    Pipeline {
        /// Pipeline name
        name: String,
        /// Pipeline run counter
        counter: u64,
    },
    /// Map centered on a material revision
    Material {
        /// Material fingerprint
        fingerprint: String,
        /// Material revision
        revision: String,
    },
}

/// Connection settings; each falls back to the environment and config file.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ServerArgs {
    /// Server base URL (overrides VSM_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,
    /// Path to a TOML client config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API token (overrides VSM_AUTH_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,
}

impl ServerArgs {
    pub(crate) fn overrides(&self) -> vsm_client::config::ConfigOverrides {
        vsm_client::config::ConfigOverrides {
            config_file: self.config.clone(),
            server_url: self.server.clone(),
            auth_token: self.token.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Commands::Parse { file } => {
            commands::parse::cmd_parse(&file, cli.output, cli.quiet);
        }
        Commands::Validate { file } => {
            commands::validate::cmd_validate(&file, cli.output, cli.quiet);
        }
        Commands::Page {
            file,
            fetch,
            server,
        } => {
            commands::page::cmd_page(&file, fetch, &server, cli.output, cli.quiet);
        }
        Commands::Fetch { target, server } => {
            commands::fetch::cmd_fetch(&target, &server, cli.output, cli.quiet);
        }
    }
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` wins; otherwise
/// warnings only, or nothing with `--quiet`.
fn init_tracing(quiet: bool) {
    let default = if quiet { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

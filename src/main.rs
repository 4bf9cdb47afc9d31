use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use gposwitch::commands::{check, find, init, label, show};
use gposwitch::config::{self, load_config};
use gposwitch::logging::init_logging;

#[derive(Parser)]
#[command(name = "gposwitch")]
#[command(version, about = "Inspect and validate GPO relay controller client configs")]
struct Cli {
    /// Config file (JSON, or TOML with a .toml extension)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print endpoint, timing and output table
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the config file
    Check,

    /// Print the label of one output channel
    Label {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Search output labels (`*` wildcards, case-insensitive)
    Find { pattern: String },

    /// Write the default demo config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let path: PathBuf = match cli.config.as_deref() {
        Some(p) => config::path::expand(p),
        None => config::config_path(),
    };

    match cli.command {
        Commands::Init { force } => init::init_config(&path, force),
        Commands::Check => Ok(check::check_file(&path)?),
        Commands::Show { json } => {
            let cfg = load_config(&path).with_context(|| format!("loading {}", path.display()))?;
            if json {
                let mut s = show::render_json(&cfg)?;
                s.push('\n');
                Ok(s)
            } else {
                Ok(show::render_table(&cfg))
            }
        }
        Commands::Label { index } => {
            let cfg = load_config(&path).with_context(|| format!("loading {}", path.display()))?;
            Ok(label::render_label(&cfg, index)?)
        }
        Commands::Find { pattern } => {
            let cfg = load_config(&path).with_context(|| format!("loading {}", path.display()))?;
            Ok(find::render_find(&cfg, &pattern))
        }
    }
}

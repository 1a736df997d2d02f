//! CLI main entry point for LegoGroth16 runs

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lego_cli::{commands, config::LegoConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[derive(Parser)]
#[command(name = "lego-cli")]
#[command(about = "Generate, prove and verify LegoGroth16 instances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a configuration file
    InitConfig {
        /// Output file
        #[arg(short, long, default_value = "lego.json")]
        output: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Generate an instance, set up keys, prove and verify
    Run {
        /// Configuration file; defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Export keys, statement and proof to this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Re-verify artifacts exported by `run --out-dir`
    Verify {
        /// Directory holding the exported artifacts
        #[arg(short, long)]
        dir: PathBuf,
    },
}

/// Flags that take precedence over the configuration file
#[derive(Args)]
struct Overrides {
    #[arg(long)]
    num_constraints: Option<usize>,

    #[arg(long)]
    primary_input_size: Option<usize>,

    #[arg(long)]
    comm_input_size: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Export points uncompressed
    #[arg(long)]
    uncompressed: bool,
}

impl Overrides {
    fn apply(self, mut config: LegoConfig) -> LegoConfig {
        if let Some(n) = self.num_constraints {
            config.num_constraints = n;
        }
        if let Some(n) = self.primary_input_size {
            config.primary_input_size = n;
        }
        if let Some(n) = self.comm_input_size {
            config.comm_input_size = n;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.uncompressed {
            config.compress = false;
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
}

fn verdict(accepted: bool) -> ExitCode {
    if accepted {
        println!("accepted");
        ExitCode::SUCCESS
    } else {
        println!("rejected");
        ExitCode::FAILURE
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig { output, overrides } => {
            let config = overrides.apply(LegoConfig::default());
            config.validate()?;
            config
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("wrote {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run {
            config,
            out_dir,
            overrides,
        } => {
            let base = match config {
                Some(path) => LegoConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => LegoConfig::default(),
            };
            let config = overrides.apply(base);
            let accepted = commands::run(&config, out_dir.as_deref())?;
            Ok(verdict(accepted))
        }
        Commands::Verify { dir } => {
            let accepted = commands::verify(&dir)
                .with_context(|| format!("verifying artifacts in {}", dir.display()))?;
            Ok(verdict(accepted))
        }
    }
}

use clap::{Args, Parser, Subcommand};
use gzserve_core::cli::{self, ReportFormat};
use gzserve_core::conf::{ConfigError, load_config};
use gzserve_core::logging::{LogFormat, init_logging};
use gzserve_core::server;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "gzserve.hcl";

#[derive(Parser, Debug)]
#[command(
    name = "gzserve",
    version,
    about = "gzserve: serves pre-compressed static assets"
)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct ConfigArg {
    /// Path to the config file
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the asset index and serve (default)
    Run {
        #[command(flatten)]
        config: ConfigArg,
    },

    /// Validate configuration and exit
    Check {
        #[command(flatten)]
        config: ConfigArg,

        /// Output the report as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,

        /// Plain output without colors
        #[arg(long)]
        plain: bool,
    },

    /// Print the pre-compressed asset index
    Index {
        #[command(flatten)]
        config: ConfigArg,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Print resolved configuration
    Dump {
        #[command(flatten)]
        config: ConfigArg,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check {
            config,
            json,
            plain,
        }) => {
            let format = if json {
                ReportFormat::Json
            } else if plain {
                ReportFormat::Plain
            } else {
                ReportFormat::Pretty
            };
            cli::check(&config.config, format)
        }

        Some(Command::Index { config, yaml, .. }) => cli::index(&config.config, yaml),

        Some(Command::Dump { config, yaml, .. }) => cli::dump(&config.config, yaml),

        Some(Command::Run { config }) => serve(cli.log_format, &config.config),

        None => serve(cli.log_format, Path::new(DEFAULT_CONFIG)),
    }
}

fn serve(log_format: LogFormat, config_path: &Path) -> anyhow::Result<()> {
    init_logging(log_format);

    let validated = match load_config(config_path) {
        Ok(validated) => validated,
        Err(ConfigError::Validation { report }) => {
            report.render_plain();
            anyhow::bail!("invalid configuration in {}", config_path.display());
        }
        Err(err) => return Err(err.into()),
    };
    for warning in &validated.report.warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }

    server::run(validated.config)
}

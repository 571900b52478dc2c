use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pcforge::client::BuildClient;
use pcforge::config::Config;
use pcforge::form::BuildForm;
use pcforge::parsers::build::BuildParser;
use pcforge::reports::{OutputFormat, generate_form_report, render_report};
use pcforge::session::BuildSession;

#[derive(Parser)]
#[command(name = "pcforge")]
#[command(about = "Ask the PC Forge service for a build and fill the component form", long_about = None)]
#[command(version, arg_required_else_help = true)]
struct Cli {
    /// Path to a TOML config file (default: <config dir>/pcforge/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a query to the build service and show the parsed build
    Ask {
        /// What kind of PC you want
        #[arg(short, long)]
        query: String,

        /// Build service base URL (overrides the config file)
        #[arg(short, long)]
        server: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },
    /// Parse a saved build description without contacting the service
    Parse {
        /// Path to the build description
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,

        /// Exit with code 1 if any line could not be parsed
        #[arg(long)]
        fail_on_mismatch: bool,
    },
    /// Profile build description parsing (for use with cargo-flamegraph)
    ProfileParse {
        /// Path to the build description
        #[arg(short, long)]
        file: PathBuf,

        /// Number of iterations (for meaningful profiling)
        #[arg(short, long, default_value = "1000")]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Ask {
            query,
            server,
            output,
        } => run_ask(config, query, server, output).await,
        Commands::Parse {
            file,
            output,
            fail_on_mismatch,
        } => run_parse(&config, &file, output, fail_on_mismatch).await,
        Commands::ProfileParse { file, iterations } => {
            run_profile_parse(&config, &file, iterations).await
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load(path)?;
            config.apply_env_overrides();
            Ok(config)
        }
        None => Config::load_default(),
    }
}

fn parser_for(config: &Config) -> BuildParser {
    BuildParser::with_slots(config.fields.0.iter().map(|b| b.slot))
}

async fn run_ask(
    mut config: Config,
    query: String,
    server: Option<String>,
    output: OutputFormat,
) -> anyhow::Result<ExitCode> {
    if let Some(server) = server {
        config.server.base_url = server;
    }

    let client = BuildClient::new(&config.server)
        .context("Failed to create build client")?
        .require_pc_topic(config.client.require_pc_topic);
    let session = BuildSession::new(
        client,
        parser_for(&config),
        BuildForm::new(config.fields.0.clone()),
    );

    let outcome = match session.submit(&query).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(message) = session.chat().await.last() {
                eprintln!("{}", message.render());
            }
            tracing::warn!("Submit failed: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    eprintln!("{}\n", session.chat().await.render());
    eprintln!("{}\n", generate_form_report(&*session.form().await));

    let report = render_report(&outcome.build, output, &query)?;
    println!("{report}");

    Ok(ExitCode::SUCCESS)
}

async fn run_parse(
    config: &Config,
    file: &Path,
    output: OutputFormat,
    fail_on_mismatch: bool,
) -> anyhow::Result<ExitCode> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let build = parser_for(config).parse(&content);
    let report = render_report(&build, output, &file.display().to_string())?;
    println!("{report}");

    if fail_on_mismatch && !build.mismatches().is_empty() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn run_profile_parse(
    config: &Config,
    file: &Path,
    iterations: usize,
) -> anyhow::Result<ExitCode> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let iterations = iterations.max(1);

    eprintln!("Profiling parse operations for: {}", file.display());
    eprintln!("Iterations: {iterations}");
    eprintln!("File size: {} bytes", content.len());

    let parser = parser_for(config);
    let start = Instant::now();

    for _ in 0..iterations {
        std::hint::black_box(parser.parse(&content));
    }

    let elapsed = start.elapsed();
    eprintln!("\nProfiling complete!");
    eprintln!("Total time: {elapsed:?}");
    eprintln!(
        "Average per iteration: {:?}",
        average_per_iteration(elapsed, iterations)
    );

    Ok(ExitCode::SUCCESS)
}

fn average_per_iteration(elapsed: Duration, iterations: usize) -> Duration {
    elapsed.div_f64(iterations.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcforge::slots::ComponentSlot;

    #[test]
    fn test_average_per_iteration() {
        assert_eq!(
            average_per_iteration(Duration::from_secs(4), 4),
            Duration::from_secs(1)
        );
        // Counts past u32::MAX must not wrap to a zero divisor
        assert_eq!(
            average_per_iteration(Duration::from_secs(1), usize::MAX),
            Duration::ZERO
        );
        assert_eq!(average_per_iteration(Duration::from_secs(1), 0), Duration::from_secs(1));
    }

    #[test]
    fn test_parser_follows_field_bindings() {
        let config = Config::from_toml_str(
            "[[fields]]\nslot = \"Case\"\nmodel_field = \"case\"\nprice_field = \"case-price\"\n",
        )
        .unwrap();

        let parser = parser_for(&config);
        assert_eq!(parser.known_slots().collect::<Vec<_>>(), vec![ComponentSlot::Case]);

        let build = parser.parse("Case\n- NZXT H5 - £80\nCooling\n- Arctic P12 - £30");
        assert_eq!(build.len(), 1);
        assert_eq!(build.filled(), 1);
    }
}

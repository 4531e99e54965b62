//! Posts API check runner.
//!
//! Runs the posts suite against the configured endpoint, prints one line
//! per case and exits with status 1 when any case failed.
//!
//! Configuration is layered: defaults, then `--config FILE`, then the
//! `POSTS_API_*` environment variables, then command-line flags. Log output
//! goes to stderr and honours `RUST_LOG`.

use anyhow::{Context, Result};
use clap::Parser;
use posts_api_check::client::PostsClient;
use posts_api_check::config::{self, ApiClientConfig};
use posts_api_check::scenario::ScenarioRunner;
use posts_api_check::suite::{self, SCENARIO_NAMES};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "posts-check", version, about = "Run contract checks against the posts API")]
struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base address, overriding configuration
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Directory holding the filter fixtures
    #[arg(long, value_name = "DIR")]
    fixtures_dir: Option<PathBuf>,

    /// Run only the named scenario (repeatable)
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,

    /// List scenario names and exit
    #[arg(long)]
    list: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log request and response details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

/// Runs the selected scenarios. Returns whether every case passed.
fn run(cli: Cli) -> Result<bool> {
    if cli.list {
        for name in SCENARIO_NAMES {
            println!("{}", name);
        }
        return Ok(true);
    }

    let config = resolve_config(&cli)?;
    log::info!("Checking posts API at {}", config.base_url);

    let client = PostsClient::from_config(&config).context("failed to build HTTP client")?;
    let scenarios = suite::select(suite::posts_suite(&config)?, &cli.scenarios)?;

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(report.is_success())
}

fn resolve_config(cli: &Cli) -> Result<ApiClientConfig> {
    if let Some(path) = &cli.config {
        config::load_config_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    config::apply_env_overrides().context("failed to apply environment overrides")?;

    let base_url = cli.base_url.clone();
    let fixtures_dir = cli.fixtures_dir.clone();
    let verbose = cli.verbose;
    config::update_config(move |config| {
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }
        if let Some(dir) = fixtures_dir {
            config.fixtures_dir = Some(dir);
        }
        if verbose {
            config.log_exchanges = true;
        }
    })
    .context("invalid command-line settings")?;

    Ok(config::get_config())
}

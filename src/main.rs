use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Error, Result};
use clap::{ArgAction, Parser, ValueHint};

use reframe::commands::harness::HarnessInvocation;
use reframe::config::RunConfig;
use reframe::llm::ClientType;
use reframe::llm::secrets::{DEFAULT_SECRETS_FILE, resolve_api_key, system_env};
use reframe::logger;
use reframe::suites::{self, LiveRunner, TestSelection};

const API_KEY_HINT: &str =
    "Please provide an API key using --api_key or set the appropriate environment variable";

#[derive(Parser, Debug)]
#[command(
    name = "reframe",
    version,
    about = "Run the Reframe LLM test suites.",
    long_about = None
)]
struct Cli {
    /// Specific test to run
    #[arg(value_enum, default_value_t = TestSelection::All)]
    test: TestSelection,
    /// API key for the LLM service
    #[arg(long = "api_key", visible_alias = "api-key", value_name = "KEY")]
    api_key: Option<String>,
    /// Model name to use for testing. Each client has its own default.
    #[arg(long, value_name = "NAME")]
    model: Option<String>,
    /// Client type
    #[arg(long, value_enum, default_value_t = ClientType::OpenAi)]
    client: ClientType,
    /// Run the suites through `cargo test` instead of the built-in sequencer
    #[arg(long = "cargo-test", alias = "pytest", default_value_t = false)]
    cargo_test: bool,
    /// Secrets file consulted when no key is passed or set in the environment
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_SECRETS_FILE,
        value_hint = ValueHint::FilePath
    )]
    secrets: PathBuf,
    /// Per-request timeout for the built-in sequencer
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 120,
        value_parser = clap::value_parser!(u64).range(1..),
        conflicts_with = "cargo_test"
    )]
    timeout: u64,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = logger::initialize(cli.verbose) {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }

    // Credential failures are reported on stdout
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            println!("{}", credential_diagnostic(&err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_cli(&cli, &config).await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let resolved = resolve_api_key(cli.api_key.as_deref(), cli.client, system_env, &cli.secrets)?;
    let mut config = RunConfig::new(resolved.api_key, cli.model.clone(), cli.client);
    config.settings.timeout = Duration::from_secs(cli.timeout);
    Ok(config)
}

fn credential_diagnostic(err: &Error) -> String {
    format!("{err:#}\n{API_KEY_HINT}")
}

async fn run_cli(cli: &Cli, config: &RunConfig) -> Result<()> {
    if cli.cargo_test {
        return HarnessInvocation::new(config, cli.test).run();
    }

    suites::run_selection(cli.test, config, &mut LiveRunner).await
}

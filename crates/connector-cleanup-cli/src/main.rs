// crates/connector-cleanup-cli/src/main.rs
// ============================================================================
// Module: Connector Cleanup CLI Entry Point
// Description: Interactive asset cleanup against a connector management API.
// Purpose: Load settings, select assets, confirm, and run the cascade.
// Dependencies: clap, connector-cleanup-{core,config,client}, serde_json,
//               thiserror, tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! `connector-cleanup` lists the provider's assets, lets the operator pick
//! some, asks for confirmation, and deletes each selected asset after its
//! dependent contract definitions and agreements. Operator text goes to
//! stdout through the i18n catalog; structured logs go to stderr.
//!
//! Exit codes: failure only for configuration problems, client construction
//! failures, and terminal I/O errors. Individual deletion failures are
//! reported in the summary and do not change the exit code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;
use connector_cleanup_cli::i18n::Locale;
use connector_cleanup_cli::i18n::set_locale;
use connector_cleanup_cli::prompt::confirm_deletion;
use connector_cleanup_cli::prompt::prompt_selection;
use connector_cleanup_cli::summary::render_summary;
use connector_cleanup_cli::t;
use connector_cleanup_client::HttpManagementClient;
use connector_cleanup_client::ManagementClientConfig;
use connector_cleanup_client::default_user_agent;
use connector_cleanup_config::CleanupConfig;
use connector_cleanup_config::DEFAULT_ENV_FILE;
use connector_cleanup_core::CleanupSummary;
use connector_cleanup_core::DependencySnapshot;
use connector_cleanup_core::runtime::list_assets;
use connector_cleanup_core::runtime::run_cascade;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "CONNECTOR_CLEANUP_LANG";
/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "connector-cleanup",
    version,
    about = "Delete selected assets and their dependent contracts from a connector."
)]
struct Cli {
    /// Path to the environment file.
    #[arg(short = 'e', long = "env", value_name = "PATH", default_value = DEFAULT_ENV_FILE)]
    env: PathBuf,
    /// Confirm deletions without prompting.
    #[arg(long)]
    yes: bool,
    /// Output language (overrides `CONNECTOR_CLEANUP_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
    /// Print the final summary as a JSON object instead of text.
    #[arg(long)]
    summary_json: bool,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal CLI error carrying a localized message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Localized message shown to the operator.
    message: String,
}

impl CliError {
    /// Wraps a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Runs one cleanup session.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    init_logging(cli.log_json)?;
    tracing::info!(locale = locale.as_str(), "output locale selected");

    tracing::info!(path = %cli.env.display(), "loading environment");
    let config = CleanupConfig::load(&cli.env)
        .map_err(|err| CliError::new(t!("config.failed", error = err)))?;
    let client = HttpManagementClient::new(client_config(&config))
        .map_err(|err| CliError::new(t!("client.failed", error = err)))?;
    let query = config.query_spec();

    let assets = list_assets(&client, &query);
    if assets.is_empty() {
        write_stdout_line(&t!("assets.none_found"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let selected = {
        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();
        let selected =
            prompt_selection(&mut input, &mut output, &assets).map_err(terminal_error)?;
        if selected.is_empty() {
            writeln!(output, "{}", t!("select.nothing_selected")).map_err(terminal_error)?;
            return Ok(ExitCode::SUCCESS);
        }
        if !confirm_deletion(&mut input, &mut output, &selected, cli.yes)
            .map_err(terminal_error)?
        {
            return Ok(ExitCode::SUCCESS);
        }
        selected
    };

    let snapshot = DependencySnapshot::fetch(&client, &query);
    let summary = run_cascade(&client, &selected, &snapshot);
    tracing::info!(
        assets_attempted = summary.assets.attempted(),
        definitions_attempted = summary.contract_definitions.attempted(),
        agreements_attempted = summary.contract_agreements.attempted(),
        "cleanup finished"
    );
    if summary.has_failures() {
        tracing::warn!(
            assets_failed = summary.assets.failed,
            definitions_failed = summary.contract_definitions.failed,
            agreements_failed = summary.contract_agreements.failed,
            "cleanup finished with failures"
        );
    }
    emit_summary(&summary, cli.summary_json)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Installs the global tracing subscriber writing to stderr.
fn init_logging(json: bool) -> CliResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(fmt::layer().json().with_writer(io::stderr)).try_init()
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).try_init()
    };
    result.map_err(|err| CliError::new(t!("logging.init_failed", error = err)))
}

/// Builds the transport settings from the loaded configuration.
fn client_config(config: &CleanupConfig) -> ManagementClientConfig {
    ManagementClientConfig {
        base_url: config.base_url.clone(),
        management_prefix: config.management_prefix.clone(),
        api_key: config.api_key.expose().to_string(),
        timeout: config.timeout(),
        max_response_bytes: config.max_response_bytes,
        user_agent: default_user_agent(),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes the end-of-run summary to stdout.
fn emit_summary(summary: &CleanupSummary, json: bool) -> CliResult<()> {
    if json {
        let encoded = serde_json::to_string(summary)
            .map_err(|err| CliError::new(t!("summary.encode_failed", error = err)))?;
        return write_stdout_line(&encoded)
            .map_err(|err| CliError::new(output_error("stdout", &err)));
    }
    for line in render_summary(summary) {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output failure message.
fn output_error(stream: &str, err: &io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = err)
}

/// Maps a terminal I/O failure into a CLI error.
fn terminal_error(err: io::Error) -> CliError {
    CliError::new(t!("terminal.io_failed", error = err))
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::api::HttpConsoleApi;
use crate::infrastructure::config::{ConfigOverrides, ConfigService};
use crate::infrastructure::http::HttpClient;
use crate::interfaces::cli::notify::ToastLevel;
use crate::interfaces::cli::router::route_for_error;
use crate::interfaces::cli::state::ConsoleState;
use crate::interfaces::cli::{command_route, dispatch, Cli};

/// `RUST_LOG` wins over the configured filter. Logs go to stderr; stdout
/// carries page output.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_state(config: &ConfigService) -> Result<ConsoleState> {
    let tokens = config.token_store()?;
    let http = Arc::new(HttpClient::new(config.config(), tokens.clone())?);
    let api = Arc::new(HttpConsoleApi::new(http));
    Ok(ConsoleState::new(api, tokens, config.config().api_base()))
}

/// Prints what a failed command means for the user. Session failures send
/// them to the login page; the stored token is left as it is.
fn report_error(err: &AppError, out: &mut dyn Write, err_out: &mut dyn Write) -> io::Result<()> {
    match route_for_error(err) {
        Some(route) => {
            warn!(redirect = %route, "Session rejected");
            writeln!(out, "-> {}", route)?;
            writeln!(err_out, "Not logged in or session expired. Run: endpoint-console login")
        }
        None => {
            error!(error = %err, "Command failed");
            writeln!(err_out, "error: {}", err)
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        config_file: cli.config.clone(),
        api_url: cli.api_url.clone(),
        ephemeral: cli.ephemeral,
    };

    let config = match ConfigService::load(&overrides) {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.config().log_filter);

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start async runtime: {}", err);
            return ExitCode::from(2);
        }
    };

    debug!(route = ?command_route(&cli.command), "Dispatching");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = runtime.block_on(dispatch(&state, cli.command, &mut input, &mut out));
    let _ = out.flush();

    let failed_action = state
        .toasts
        .snapshot()
        .iter()
        .any(|toast| matches!(toast.level, ToastLevel::Error | ToastLevel::Warning));
    let mut err_out = io::stderr();
    let _ = state.toasts.flush(&mut err_out);

    match outcome {
        Ok(()) if failed_action => ExitCode::FAILURE,
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = report_error(&err, &mut out, &mut err_out);
            ExitCode::FAILURE
        }
    }
}

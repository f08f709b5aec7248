//! Buildpack compile entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vault_buildpack::cli::Cli;
use vault_buildpack::compile::compile;
use vault_buildpack::error::Result;
use vault_buildpack::ui::{create_ui, should_use_colors, OutputMode, UserInterface};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout carries the build output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("vault_buildpack=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vault_buildpack=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("vault-buildpack starting with args: {:?}", cli);

    let colors = !cli.no_color && should_use_colors();
    let mut ui = create_ui(OutputMode::from_quiet(cli.quiet), colors);

    match run(&cli, ui.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(&e.to_string());
            if let Some(hint) = e.hint() {
                ui.error(&hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> Result<()> {
    cli.check_protocol()?;

    let report = compile(&cli.dirs(), cli.release_host.as_deref(), cli.timeout, ui)?;
    ui.topic(&format!("Vault {} installed", report.version.trim()));
    Ok(())
}

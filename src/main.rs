//! create-fluide entry point.

use std::process::ExitCode;

use clap::Parser;
use fluide::cli::{Command, CreateArgs, CreateCommand};
use fluide::shell::is_ci;
use fluide::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fluide=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fluide=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    // npm 7+ forwards a bare `--` to initializers
    let args =
        CreateArgs::parse_from(std::env::args_os().filter(|arg| arg.to_str() != Some("--")));
    init_tracing(args.debug);

    tracing::debug!("create-fluide starting with args: {:?}", args);

    let working_dir = std::env::current_dir().unwrap_or_default();
    let mut ui = create_ui(!is_ci(), args.output_mode());

    match CreateCommand::new(&working_dir, args).execute(ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

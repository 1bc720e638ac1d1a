//! chkconfig CLI - Check, get, set, and list on/off configuration flags.

use chkconfig::cli::{Cli, Mode};
use chkconfig::commands::{self, Output, SortOrder};
use chkconfig::config::{OptionValue, Options};
use chkconfig::context::Context;
use clap::{CommandFactory, Parser};
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "CHKCONFIG_LOG";

fn main() {
    let cli = Cli::parse();

    init_logging(&cli);

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(message) => Cli::command()
            .error(clap::error::ErrorKind::ArgumentConflict, message)
            .exit(),
    };

    let context = Context::with_options(build_options(&cli));

    if let Err(e) = run(&context, &cli, mode) {
        if !cli.quiet {
            eprintln!("chkconfig: {}", e);
        }
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };

    // Quiet wins over any directive in the environment.
    let filter = if cli.quiet {
        EnvFilter::new("off")
    } else {
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Layer CLI flags and environment overrides on top of the built-in defaults.
fn build_options(cli: &Cli) -> Options {
    let mut options = Options::new();

    options.set(OptionValue::ForceState(cli.force));

    if let Some(ref directory) = cli.default_directory {
        options.set(OptionValue::DefaultDirectory(directory.clone()));
    }

    if let Some(ref directory) = cli.state_directory {
        options.set(OptionValue::StateDirectory(directory.clone()));
    }

    if cli.use_default_directory {
        options.set(OptionValue::UseDefaultDirectory(true));
    }

    options
}

fn run(context: &Context, cli: &Cli, mode: Mode) -> Result<(), chkconfig::Error> {
    match mode {
        Mode::List => {
            let order = if cli.state {
                SortOrder::State
            } else {
                SortOrder::Flag
            };
            output(&commands::list_flags(context, order, cli.origin)?, cli.json);
        }
        Mode::Get(flag) => {
            output(&commands::get_flag(context, &flag)?, cli.json);
        }
        Mode::Set(flag, state) => {
            let result = commands::set_flag(context, &flag, state)?;
            if cli.json || cli.verbose {
                output(&result, cli.json);
            }
        }
    }

    Ok(())
}

fn output<T: Output>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}

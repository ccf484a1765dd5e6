//!
//! The gas reporter executable.
//!

pub(crate) mod arguments;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use self::arguments::Arguments;

/// The successful exit code.
const EXIT_CODE_SUCCESS: i32 = 0;

/// The failure exit code.
const EXIT_CODE_FAILURE: i32 = 1;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    init_tracing_subscriber(arguments.verbose, arguments.quiet);

    let mut config = match arguments.config.as_deref() {
        Some(path) => gas_reporter::Config::try_from(path)?,
        None => gas_reporter::Config::default(),
    };
    arguments.apply(&mut config);
    if config.no_colors {
        colored::control::set_override(false);
    }

    if !arguments.quiet {
        println!(
            "    {} {} v{}",
            "Starting".bright_green().bold(),
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION"),
        );
    }

    let client = gas_reporter::HttpClient::new(config.url.as_str())?;
    let mut reporter = gas_reporter::GasReporter::new(Box::new(client), config.clone())?;
    reporter.on_suite_start()?;
    reporter.start_at(arguments.from_block);

    if !arguments.quiet {
        println!(
            "    {} blocks {}..={} at {}",
            "Scanning".bright_green().bold(),
            arguments.from_block,
            reporter.latest_block_number()?,
            config.url,
        );
    }
    let report = reporter.on_suite_end()?;

    if !arguments.quiet {
        println!("{report}");
    }
    if let Some(path) = config.output_file {
        report.write_to_file(path)?;
    }
    if let Some(path) = config.output_json {
        gas_reporter::Json::try_from(&report)?.write_to_file(path)?;
    }

    Ok(())
}

///
/// Initializes the logging, reading the filter from `RUST_LOG` unless overridden.
///
fn init_tracing_subscriber(verbose: bool, quiet: bool) {
    let env_filter = match std::env::var_os(EnvFilter::DEFAULT_ENV) {
        Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::new("info"),
    };
    let level_filter = if quiet {
        Some(LevelFilter::OFF)
    } else if verbose {
        Some(LevelFilter::DEBUG)
    } else {
        None
    };

    let builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();
    match level_filter {
        Some(level_filter) => builder.with_max_level(level_filter).init(),
        None => builder.init(),
    }
}

//! Droid Report
//!
//! Renders human-readable analysis reports of Android packages from the property bags produced
//! by a static extraction pipeline. The core of the crate is the [`analysis`] module, with its
//! three classifiers: [`capabilities`](analysis::capabilities),
//! [`is_spyware`](analysis::is_spyware) and [`list_kits`](analysis::list_kits).

#![forbid(
    anonymous_parameters,
    late_bound_lifetime_arguments,
    path_statements,
    patterns_in_fns_without_body,
    trivial_numeric_casts
)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod properties;
pub mod results;
pub mod utils;

use crate::{
    config::Config,
    properties::PropertyBag,
    results::{console, Results},
};
use clap::ArgMatches;
use colored::Colorize;
use failure::{Error, ResultExt};
use log::{debug, info, Level, LevelFilter};
use std::{env, io::Write, path::Path};

/// Initializes the configuration with the configuration files and command line options.
///
/// On UNIX, if the local file (`config.toml`) does not exist, but the global one does
/// (`/etc/droid-report/config.toml`), the latter is used. Otherwise, the local file is used.
/// Finally, if none of the files could be loaded, the default configuration is used.
pub fn initialize_config(cli: &ArgMatches<'_>) -> Result<Config, Error> {
    let config_path = Path::new("config.toml");
    let global_config_path = Path::new("/etc/droid-report/config.toml");

    let mut config =
        if cfg!(target_family = "unix") && !config_path.exists() && global_config_path.exists() {
            Config::from_file(global_config_path)
                .context("there was an error when reading the /etc/droid-report/config.toml file")?
        } else if config_path.exists() {
            Config::from_file(config_path)
                .context("there was an error when reading the config.toml file")?
        } else {
            log::warn!("config file not found, using the default configuration");
            Config::default()
        };

    config
        .decorate_with_cli(cli)
        .context("there was an error reading the configuration from the command line")?;

    Ok(config)
}

/// Initializes the logger.
///
/// The `RUST_LOG` environment variable, if set, overrides the default filter.
pub fn initialize_logger(is_verbose: bool) -> Result<(), log::SetLoggerError> {
    let log_level = if is_verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    let _ = builder.format(|buf, record| match record.level() {
        Level::Warn => writeln!(
            buf,
            "{}{}",
            "Warning: ".bold().yellow(),
            record.args().to_string().yellow()
        ),
        Level::Error => writeln!(
            buf,
            "{}{}",
            "Error: ".bold().red(),
            record.args().to_string().red()
        ),
        Level::Debug => writeln!(
            buf,
            "{}{}",
            "Debug: ".bold(),
            record.args().to_string().bold()
        ),
        Level::Info => writeln!(buf, "{}", record.args()),
        Level::Trace => writeln!(buf, "{}: {}", record.level(), record.args()),
    });

    if let Ok(env_log) = env::var("RUST_LOG") {
        let _ = builder.parse(&env_log);
    } else {
        let _ = builder.filter(Some("droid_report"), log_level);
    }

    builder.try_init()
}

/// Reports on the sample described by the given properties file.
///
/// Prints the properties of the sample, unless in quiet mode, and writes the reports selected in
/// the configuration. Returns the results of the sample.
pub fn report_sample<P: AsRef<Path>>(properties: P, config: &Config) -> Result<Results, Error> {
    let properties = properties.as_ref();
    let bag = PropertyBag::from_file(properties)?;
    let name = utils::sample_name(&bag, properties);

    if !config.is_quiet() {
        println!();
        println!("Properties of {}:", name.italic());
        console::print_properties(&bag, config.catalog())
            .context("could not print the properties")?;
        println!();
    }

    let files = match config.unzipped_folder() {
        Some(folder) => utils::list_files(folder).with_context(|_| {
            format!("could not list the files of {}", folder.display())
        })?,
        None => Vec::new(),
    };

    let results = Results::new(name, &bag, config.catalog(), files);
    debug!(
        "{}: {} capabilities, {} kits, spyware: {}",
        results.name(),
        results.assessment().capabilities().len(),
        results.assessment().kits().len(),
        results.assessment().is_spyware()
    );

    if results.generate_report(config).with_context(|_| {
        format!(
            "there was an error generating the reports, tried to generate them at: {}",
            results.folder(config).display()
        )
    })? {
        info!(
            "reports for {} written to {}",
            results.name(),
            results.folder(config).display()
        );
    }

    if config.is_open() {
        open_report(&results, config)?;
    }

    Ok(results)
}

/// Opens the main report of the given results.
fn open_report(results: &Results, config: &Config) -> Result<(), Error> {
    let open_path = if config.has_to_generate_markdown() {
        results.folder(config).join("report.md")
    } else if config.has_to_generate_json() {
        results.folder(config).join("results.json")
    } else {
        return Ok(());
    };

    let status = open::that(&open_path).context("the report could not be opened automatically")?;
    if !status.success() {
        failure::bail!("report opening errored with status code: {}", status);
    }

    Ok(())
}

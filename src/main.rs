//! Droid Report command line tool.

use droid_report_core::{
    cli, initialize_config, initialize_logger, report_sample, utils::log_error,
};
use log::{debug, error, info};
use std::process;

fn main() {
    let cli = cli::generate_cli().get_matches();
    let verbose = cli.is_present("verbose");

    if let Err(e) = initialize_logger(verbose) {
        eprintln!("could not initialize the logger: {}", e);
    }

    let config = match initialize_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            log_error(&e, verbose);
            process::exit(1);
        }
    };
    for file in config.loaded_config_files() {
        debug!("configuration loaded from {}", file.display());
    }

    let mut failed = 0;
    let samples = cli.values_of("properties").into_iter().flatten();
    for properties in samples {
        if let Err(e) = report_sample(properties, &config) {
            error!("could not report on {}", properties);
            log_error(&e, config.is_verbose());
            failed += 1;
        }
    }

    if failed > 0 {
        if !config.is_quiet() {
            info!("{} sample(s) could not be reported on", failed);
        }
        process::exit(1);
    }
}

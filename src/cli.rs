//! Command line interface module.

use clap::{crate_authors, crate_description, crate_version, App, Arg};

/// Generates the command line interface.
pub fn generate_cli() -> App<'static, 'static> {
    App::new("droid-report")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("properties")
                .help("Property files of the samples to report on")
                .value_name("PROPERTIES")
                .required(true)
                .multiple(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .conflicts_with("quiet")
                .help("If you'd like the tool to explain what it is doing"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("If you'd like a zen report, without the property dump"),
        )
        .arg(
            Arg::with_name("force")
                .short("f")
                .long("force")
                .help("If you'd like to force the regeneration of existing reports"),
        )
        .arg(
            Arg::with_name("open")
                .long("open")
                .help("Open the report in a viewer once it has been generated"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Also generate a JSON report"),
        )
        .arg(
            Arg::with_name("no-markdown")
                .long("no-markdown")
                .help("Do not generate the Markdown report"),
        )
        .arg(
            Arg::with_name("results")
                .short("r")
                .long("results")
                .value_name("DIR")
                .takes_value(true)
                .help("Folder where the reports are written"),
        )
        .arg(
            Arg::with_name("files")
                .long("files")
                .value_name("DIR")
                .takes_value(true)
                .help("Unzipped package folder, used to list the files installed on the device"),
        )
}

//! Configuration module.
//!
//! Handles and configures the initial settings and variables needed to run the program. Values
//! come, in order, from the built-in defaults, a `config.toml` file and the command line.

use crate::{error::ErrorKind, properties::section::Catalog};
use clap::ArgMatches;
use failure::{Error, ResultExt};
use log::warn;
use serde_derive::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    slice::Iter,
};

/// Config structure.
///
/// Contains configuration related fields. It is used for storing the configuration parameters and
/// checking their values. Implements the `Default` trait.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Boolean to represent `--verbose` mode.
    #[serde(skip)]
    verbose: bool,
    /// Boolean to represent `--quiet` mode.
    #[serde(skip)]
    quiet: bool,
    /// Boolean to represent `--force` mode.
    #[serde(skip)]
    force: bool,
    /// Boolean to represent `--open` mode.
    open: bool,
    /// Boolean to represent the Markdown report generation.
    markdown: bool,
    /// Boolean to represent the JSON report generation.
    json: bool,
    /// Path to the folder where the results are written.
    results_folder: PathBuf,
    /// Path to the unzipped package, used to list the installed files.
    unzipped_folder: Option<PathBuf>,
    /// Descriptions and report phrases of the signals.
    catalog: Catalog,
    /// Configuration files that have been loaded.
    #[serde(skip)]
    loaded_files: Vec<PathBuf>,
}

impl Config {
    /// Creates a new `Config` struct from the given TOML file.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, Error> {
        let config_path = config_path.as_ref();
        let toml = fs::read_to_string(config_path).with_context(|_| {
            format!(
                "could not read the configuration file {}",
                config_path.display()
            )
        })?;

        let mut config = Self::from_toml(&toml).with_context(|_| {
            format!("invalid configuration file {}", config_path.display())
        })?;
        config.loaded_files.push(config_path.to_path_buf());

        Ok(config)
    }

    /// Parses a configuration from its TOML text.
    fn from_toml(toml: &str) -> Result<Self, ErrorKind> {
        toml::from_str(toml).map_err(|e| ErrorKind::Config {
            message: e.to_string(),
        })
    }

    /// Modifies the options from the CLI.
    pub fn decorate_with_cli(&mut self, cli: &ArgMatches<'_>) -> Result<(), Error> {
        self.verbose = cli.is_present("verbose");
        self.quiet = cli.is_present("quiet");
        self.force = cli.is_present("force");
        self.open = self.open || cli.is_present("open");
        self.json = self.json || cli.is_present("json");
        if cli.is_present("no-markdown") {
            self.markdown = false;
        }

        if let Some(results_folder) = cli.value_of("results") {
            self.results_folder = PathBuf::from(results_folder);
        }
        if let Some(unzipped_folder) = cli.value_of("files") {
            self.unzipped_folder = Some(PathBuf::from(unzipped_folder));
        }

        if let Some(unzipped_folder) = &self.unzipped_folder {
            if !unzipped_folder.is_dir() {
                return Err(ErrorKind::Config {
                    message: format!(
                        "the unzipped package folder {} does not exist",
                        unzipped_folder.display()
                    ),
                }
                .into());
            }
        }

        if !self.markdown && !self.json {
            warn!("no report format selected, only the properties will be printed");
        }

        Ok(())
    }

    /// Returns the configuration files that were loaded.
    pub fn loaded_config_files(&self) -> Iter<'_, PathBuf> {
        self.loaded_files.iter()
    }

    /// Returns true if the application is running in `--verbose` mode, false otherwise.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Returns true if the application is running in `--quiet` mode, false otherwise.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Returns true if the application is running in `--force` mode, false otherwise.
    pub fn is_force(&self) -> bool {
        self.force
    }

    /// Returns true if the generated report has to be opened.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true if the Markdown report has to be generated.
    pub fn has_to_generate_markdown(&self) -> bool {
        self.markdown
    }

    /// Returns true if the JSON report has to be generated.
    pub fn has_to_generate_json(&self) -> bool {
        self.json
    }

    /// Returns the path to the `results_folder`.
    pub fn results_folder(&self) -> &Path {
        &self.results_folder
    }

    /// Returns the path to the unzipped package, if any.
    pub fn unzipped_folder(&self) -> Option<&Path> {
        self.unzipped_folder.as_ref().map(PathBuf::as_path)
    }

    /// Returns the signal catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sets the `--force` mode.
    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    /// Sets the results folder.
    pub fn set_results_folder<P: Into<PathBuf>>(&mut self, results_folder: P) {
        self.results_folder = results_folder.into();
    }

    /// Sets which reports have to be generated.
    pub fn set_reports(&mut self, markdown: bool, json: bool) {
        self.markdown = markdown;
        self.json = json;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            quiet: false,
            force: false,
            open: false,
            markdown: true,
            json: false,
            results_folder: PathBuf::from("results"),
            unzipped_folder: None,
            catalog: Catalog::default(),
            loaded_files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::{cli::generate_cli, error::ErrorKind, properties::section::CategoryConfig};
    use std::path::Path;

    #[test]
    fn it_config() {
        let config = Config::default();

        assert!(!config.is_verbose());
        assert!(!config.is_quiet());
        assert!(!config.is_force());
        assert!(!config.is_open());
        assert!(config.has_to_generate_markdown());
        assert!(!config.has_to_generate_json());
        assert_eq!(config.results_folder(), Path::new("results"));
        assert!(config.unzipped_folder().is_none());
        assert_eq!(config.catalog().smali().report("camera"), Some("Takes pictures"));
        assert!(config.loaded_config_files().next().is_none());
    }

    #[test]
    fn it_config_sample() {
        let config = Config::from_file("config.toml.sample").unwrap();

        assert!(config.has_to_generate_markdown());
        assert!(!config.has_to_generate_json());
        assert!(!config.is_open());
        assert_eq!(config.results_folder(), Path::new("results"));
        assert_eq!(
            config.loaded_config_files().next().map(|p| p.as_path()),
            Some(Path::new("config.toml.sample"))
        );
        // Tables not present in the sample keep their built-in contents.
        assert!(!config.catalog().smali().is_empty());
        assert!(!config.catalog().kits().is_empty());
    }

    #[test]
    fn it_replaces_catalog_tables() {
        let config = Config::from_toml(
            r#"
            json = true
            results_folder = "out"

            [[catalog.kits]]
            key = "zbar"
            description = "ZBar barcode reader library"
            report = "ZBar"

            [[catalog.kits]]
            key = "admob"
            "#,
        )
        .unwrap();

        assert!(config.has_to_generate_json());
        assert!(config.has_to_generate_markdown());
        assert_eq!(config.results_folder(), Path::new("out"));

        let kits = config.catalog().kits();
        assert_eq!(kits.sections().collect::<Vec<_>>(), vec!["zbar", "admob"]);
        assert_eq!(kits.report("zbar"), Some("ZBar"));
        assert_eq!(kits.report("admob"), None);
        assert_eq!(config.catalog().smali().report("camera"), Some("Takes pictures"));
    }

    #[test]
    fn it_rejects_invalid_files() {
        match Config::from_toml("results_folder = 3") {
            Err(ErrorKind::Config { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Config::from_file("this/file/does/not/exist.toml").is_err());
    }

    #[test]
    fn it_decorates_with_cli() {
        let matches = generate_cli().get_matches_from(vec![
            "droid-report",
            "-v",
            "--force",
            "--json",
            "--no-markdown",
            "--results",
            "reports",
            "sample.json",
        ]);
        let mut config = Config::default();
        config.decorate_with_cli(&matches).unwrap();

        assert!(config.is_verbose());
        assert!(!config.is_quiet());
        assert!(config.is_force());
        assert!(config.has_to_generate_json());
        assert!(!config.has_to_generate_markdown());
        assert_eq!(config.results_folder(), Path::new("reports"));
    }

    #[test]
    fn it_rejects_missing_unzipped_folder() {
        let matches = generate_cli().get_matches_from(vec![
            "droid-report",
            "--files",
            "this/folder/does/not/exist",
            "sample.json",
        ]);
        let mut config = Config::default();

        assert!(config.decorate_with_cli(&matches).is_err());
    }
}

//! JSON report generation module.

use crate::{
    config::Config,
    results::{report::Generator, Results},
};
use failure::Error;
use log::debug;
use serde_json::ser;
use std::{
    fs::File,
    io::{BufWriter, Write},
};

/// JSON report generator.
#[derive(Debug, Default)]
pub struct Json;

impl Json {
    /// Creates a new JSON report generator.
    pub fn new() -> Self {
        Json
    }
}

impl Generator for Json {
    fn generate(&mut self, config: &Config, results: &Results) -> Result<(), Error> {
        let path = results.folder(config).join("results.json");
        debug!("writing the JSON report to {}", path.display());

        let mut f = BufWriter::new(File::create(&path)?);
        ser::to_writer(&mut f, results)?;
        f.flush()?;

        Ok(())
    }
}

//! Markdown report generation module.

use crate::{
    config::Config,
    error::ErrorKind,
    results::{report::Generator, Results},
};
use failure::Error;
use handlebars::{no_escape, Handlebars};
use log::debug;
use std::{fmt, fs::File, io::Write};

/// Template embedded in the binary.
const REPORT_TEMPLATE: &str = include_str!("../../../templates/report.md.hbs");

/// Markdown report generator.
pub struct Markdown<'r> {
    /// Handlebars template structure.
    handler: Handlebars<'r>,
}

impl<'r> Markdown<'r> {
    /// Creates a new Markdown report generator with the embedded template.
    pub fn new() -> Result<Self, Error> {
        Self::from_template(REPORT_TEMPLATE)
    }

    /// Creates a new Markdown report generator with the given template.
    pub fn from_template(template: &str) -> Result<Self, Error> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars
            .register_template_string("report", template)
            .map_err(|e| ErrorKind::Template {
                message: e.to_string(),
            })?;

        Ok(Self {
            handler: handlebars,
        })
    }

    /// Renders the report of the given results.
    pub fn render(&self, results: &Results) -> Result<String, Error> {
        let report = self
            .handler
            .render("report", results)
            .map_err(|e| ErrorKind::Template {
                message: e.to_string(),
            })?;

        Ok(report)
    }
}

impl<'r> fmt::Debug for Markdown<'r> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Markdown").finish()
    }
}

impl<'r> Generator for Markdown<'r> {
    fn generate(&mut self, config: &Config, results: &Results) -> Result<(), Error> {
        let path = results.folder(config).join("report.md");
        debug!("writing the Markdown report to {}", path.display());

        let report = self.render(results)?;
        let mut f = File::create(&path)?;
        f.write_all(report.as_bytes())?;

        Ok(())
    }
}

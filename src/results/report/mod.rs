//! Report generation module.

mod json;
mod markdown;

use crate::{config::Config, results::Results};
use failure::Error;

pub use self::{json::Json, markdown::Markdown};

/// Trait that represents a type that can generate a report.
pub trait Generator {
    /// Generates an actual report.
    fn generate(&mut self, config: &Config, results: &Results) -> Result<(), Error>;
}

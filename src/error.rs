//! Module containing the definition of error types.

use failure::Fail;

/// Enumeration of the different error kinds.
#[derive(Debug, Fail)]
pub enum ErrorKind {
    /// The property bag does not have the expected structure.
    #[fail(display = "invalid property bag: {}", message)]
    InvalidInput {
        /// Error message.
        message: String,
    },
    /// Configuration error.
    #[fail(display = "there was an error in the configuration: {}", message)]
    Config {
        /// Error message.
        message: String,
    },
    /// Report template error.
    #[fail(display = "invalid report template: {}", message)]
    Template {
        /// Error message.
        message: String,
    },
}

//! Utilities module.

use crate::properties::PropertyBag;
use colored::Colorize;
use failure::Error;
use log::{error, info};
use std::path::Path;
use walkdir::WalkDir;

/// Lists every file under the given folder.
///
/// Paths are relative to the folder, prefixed with `./` and use `/` as separator. The list is
/// sorted.
pub fn list_files<P: AsRef<Path>>(root: P) -> Result<Vec<String>, Error> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root)?;
        let components: Vec<_> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect();
        files.push(format!("./{}", components.join("/")));
    }

    files.sort();
    Ok(files)
}

/// Gets the name of the results folder of a sample.
///
/// The sanitized basename is preferred, then the SHA-256 digest, then the stem of the properties
/// file. Path separators are replaced so the name is always a single path component.
pub fn sample_name<P: AsRef<Path>>(bag: &PropertyBag, properties_path: P) -> String {
    let name = bag
        .sanitized_basename()
        .or_else(|| bag.sha256())
        .map(str::to_owned)
        .or_else(|| {
            properties_path
                .as_ref()
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "sample".to_owned());

    match name.replace(|c: char| c == '/' || c == '\\', "_").as_str() {
        "" | "." | ".." => "sample".to_owned(),
        name => name.to_owned(),
    }
}

/// Logs an error with all its causes.
pub fn log_error(e: &Error, verbose: bool) {
    error!("{}", e);
    for cause in e.iter_causes() {
        error!("caused by: {}", cause);
    }

    if !verbose {
        info!(
            "If you need more information, try to run the program again with the {} flag.",
            "-v".bold()
        );
    }
}

//! Categorized dump of the properties of a sample.
//!
//! The same dump is printed to the terminal, with highlights, and written to the reports.

use crate::properties::{
    section::{Catalog, CategoryConfig, SectionTable},
    Manifest, PropertyBag, SignalValue, Signals,
};
use colored::{ColoredString, Colorize};
use serde_derive::Serialize;
use std::io::{self, Write};

/// Colour used for the set values of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    Bold,
    Cyan,
    Yellow,
}

impl Highlight {
    fn paint(self, value: &str) -> ColoredString {
        match self {
            Highlight::Bold => value.bold(),
            Highlight::Cyan => value.cyan().bold(),
            Highlight::Yellow => value.yellow().bold(),
        }
    }
}

/// A single `key: value` line of the dump.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyLine {
    key: String,
    value: String,
    description: Option<String>,
    set: bool,
    text: String,
}

impl PropertyLine {
    fn new<K, V>(key: K, value: V, set: bool, description: Option<&str>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();
        let description = if set {
            description.map(str::to_owned)
        } else {
            None
        };
        let text = match &description {
            Some(description) => format!("{:20.20}: {} ({})", key, value, description),
            None => format!("{:20.20}: {}", key, value),
        };

        Self {
            key,
            value,
            description,
            set,
            text,
        }
    }

    /// Gets the property key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Gets the displayed value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Gets the description of the property, only present for set values.
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().map(String::as_str)
    }

    /// Checks if the value is highlighted.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Gets the plain `key: value (description)` line.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A titled group of property lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySection {
    title: Option<&'static str>,
    lines: Vec<PropertyLine>,
    #[serde(skip)]
    highlight: Highlight,
}

impl PropertySection {
    fn new(title: Option<&'static str>, highlight: Highlight) -> Self {
        Self {
            title,
            lines: Vec::new(),
            highlight,
        }
    }

    /// Gets the title of the section. The leading sample section has none.
    pub fn title(&self) -> Option<&str> {
        self.title
    }

    /// Gets the lines of the section.
    pub fn lines(&self) -> &[PropertyLine] {
        &self.lines
    }

    fn push(&mut self, line: PropertyLine) {
        self.lines.push(line);
    }

    fn push_text(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => self.push(PropertyLine::new(key, value, true, None)),
            None => self.push(PropertyLine::new(key, SignalValue::Null.to_string(), false, None)),
        }
    }

    fn push_flag(&mut self, key: &str, value: bool) {
        self.push(PropertyLine::new(key, value.to_string(), value, None));
    }

    fn push_signals<C>(&mut self, signals: &Signals, config: Option<&C>)
    where
        C: CategoryConfig + ?Sized,
    {
        for (key, value) in signals {
            let description = config.and_then(|config| config.description(key));
            self.push(PropertyLine::new(
                key.as_str(),
                value.to_string(),
                value.is_truthy(),
                description,
            ));
        }
    }
}

/// Builds the categorized dump of every property of the sample.
///
/// Signals of described categories carry their catalog description when set.
pub fn property_sections(bag: &PropertyBag, catalog: &Catalog) -> Vec<PropertySection> {
    let mut sample = PropertySection::new(None, Highlight::Bold);
    sample.push(PropertyLine::new(
        "Sanitized basename",
        bag.sanitized_basename().unwrap_or_default(),
        true,
        None,
    ));
    sample.push(PropertyLine::new(
        "SHA256",
        bag.sha256().unwrap_or_default(),
        true,
        None,
    ));

    let mut certificate = PropertySection::new(Some("Certificate properties"), Highlight::Cyan);
    let cert = bag.certificate();
    certificate.push_text("owner", cert.owner());
    certificate.push_text("serialno", cert.serial_number());
    certificate.push_text("timestamp", cert.timestamp());
    certificate.push_flag("dev", cert.is_dev());

    let mut manifest = PropertySection::new(Some("Manifest properties"), Highlight::Yellow);
    manifest_lines(&mut manifest, bag.manifest());

    let mut smali = PropertySection::new(
        Some("Smali properties / What the Dalvik code does"),
        Highlight::Yellow,
    );
    smali.push_signals(bag.smali(), Some(catalog.smali()));

    let mut wide = PropertySection::new(
        Some("Wide properties / What the resources and assets contain"),
        Highlight::Yellow,
    );
    wide.push_signals(bag.wide(), Some(catalog.wide()));

    let mut arm = PropertySection::new(
        Some("ARM properties / What the native libraries do"),
        Highlight::Yellow,
    );
    arm.push_signals(bag.arm(), Some(catalog.arm()));

    let mut dex = PropertySection::new(Some("DEX properties"), Highlight::Yellow);
    dex.push_signals::<SectionTable>(bag.dex(), None);

    let mut kits = PropertySection::new(Some("Kit properties / Third-party SDKs"), Highlight::Yellow);
    kits.push_signals(bag.kits(), Some(catalog.kits()));

    vec![sample, certificate, manifest, smali, wide, arm, dex, kits]
}

fn manifest_lines(section: &mut PropertySection, manifest: &Manifest) {
    section.push_text("package", manifest.package());
    section.push_text("main_activity", manifest.main_activity());

    for &(key, names) in &[
        ("activities", manifest.activities()),
        ("providers", manifest.providers()),
        ("receivers", manifest.receivers()),
        ("services", manifest.services()),
        ("libraries", manifest.libraries()),
        ("permissions", manifest.permissions()),
    ] {
        section.push(PropertyLine::new(
            key,
            format!("[{}]", names.join(", ")),
            !names.is_empty(),
            None,
        ));
    }

    match manifest.min_sdk() {
        Some(sdk) => section.push(PropertyLine::new("minSDK", sdk.to_string(), true, None)),
        None => section.push_text("minSDK", None),
    }

    section.push_flag("listens_incoming_sms", manifest.listens_incoming_sms());
    section.push_flag("listens_outgoing_call", manifest.listens_outgoing_call());
    section.push_flag("swf", manifest.swf());
    section.push_flag("permission_gps", manifest.permission_gps());

    section.push_signals::<SectionTable>(manifest.extra(), None);
}

/// Prints the properties of the sample to the standard output.
pub fn print_properties(bag: &PropertyBag, catalog: &Catalog) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_properties(&mut out, &property_sections(bag, catalog))
}

/// Writes the given sections, one `key: value` line per property, highlighting set values.
pub fn write_properties<W: Write>(out: &mut W, sections: &[PropertySection]) -> io::Result<()> {
    for section in sections {
        if let Some(title) = section.title() {
            writeln!(out)?;
            writeln!(out, "{}", title.black().on_white())?;
        }

        for line in section.lines() {
            if !line.is_set() {
                writeln!(out, "{:20.20}: {}", line.key(), line.value())?;
                continue;
            }

            let value = section.highlight.paint(line.value());
            match line.description() {
                Some(description) => {
                    writeln!(out, "{:20.20}: {} ({})", line.key(), value, description)?
                }
                None => writeln!(out, "{:20.20}: {}", line.key(), value)?,
            }
        }
    }

    Ok(())
}

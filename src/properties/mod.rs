//! Property bag of an analyzed sample.
//!
//! The properties are produced by an external extraction pipeline and loaded here from their JSON
//! form. Once loaded, a [`PropertyBag`] is never mutated: every analysis only borrows it.

pub mod section;
#[cfg(test)]
mod tests;

use crate::error::ErrorKind;
use failure::{Error, ResultExt};
use serde::{de, Deserializer};
use serde_derive::{Deserialize, Serialize};
use std::{
    collections::{btree_map, BTreeMap},
    convert::TryFrom,
    fmt,
    fs::File,
    io::{BufReader, Read},
    iter::FromIterator,
    path::Path,
};

/// Value of a single signal.
///
/// Most signals are booleans, but descriptive ones carry strings (`app_name`), lists (`urls`) or
/// numbers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// Absent value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// List of values.
    List(Vec<SignalValue>),
}

impl SignalValue {
    /// Checks if the value triggers its signal.
    ///
    /// Null values, `false`, zero, and empty strings or lists do not trigger anything.
    pub fn is_truthy(&self) -> bool {
        match self {
            SignalValue::Null => false,
            SignalValue::Bool(b) => *b,
            SignalValue::Int(i) => *i != 0,
            SignalValue::Float(f) => *f != 0.0,
            SignalValue::Text(s) => !s.is_empty(),
            SignalValue::List(l) => !l.is_empty(),
        }
    }

    /// Gets the value as text, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SignalValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Gets the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[SignalValue]> {
        match self {
            SignalValue::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Null => write!(f, "None"),
            SignalValue::Bool(b) => write!(f, "{}", b),
            SignalValue::Int(i) => write!(f, "{}", i),
            SignalValue::Float(x) => write!(f, "{}", x),
            SignalValue::Text(s) => write!(f, "{}", s),
            SignalValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for SignalValue {
    fn from(b: bool) -> Self {
        SignalValue::Bool(b)
    }
}

impl From<i64> for SignalValue {
    fn from(i: i64) -> Self {
        SignalValue::Int(i)
    }
}

impl<'a> From<&'a str> for SignalValue {
    fn from(s: &'a str) -> Self {
        SignalValue::Text(s.to_owned())
    }
}

impl From<String> for SignalValue {
    fn from(s: String) -> Self {
        SignalValue::Text(s)
    }
}

impl<V: Into<SignalValue>> From<Vec<V>> for SignalValue {
    fn from(items: Vec<V>) -> Self {
        SignalValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Signals of one category, keyed by signal name.
///
/// Keys are kept sorted, so iteration is always in lexicographic key order. Querying a key that
/// is not present behaves as if the signal was not set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Signals {
    values: BTreeMap<String, SignalValue>,
}

impl Signals {
    /// Gets the raw value of the given signal.
    pub fn get(&self, key: &str) -> Option<&SignalValue> {
        self.values.get(key)
    }

    /// Checks if the given signal is set. Missing signals are never set.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).map_or(false, SignalValue::is_truthy)
    }

    /// Gets the text of a string signal.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SignalValue::as_str)
    }

    /// Gets the string entries of a list signal, skipping anything that is not a string.
    pub fn texts(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .and_then(SignalValue::as_list)
            .map(|items| items.iter().filter_map(SignalValue::as_str).collect())
            .unwrap_or_default()
    }

    /// Iterates over the signals in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, SignalValue> {
        self.values.iter()
    }

    /// Number of signals in the category.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if the category has no signals at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<SignalValue>> FromIterator<(K, V)> for Signals {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'s> IntoIterator for &'s Signals {
    type Item = (&'s String, &'s SignalValue);
    type IntoIter = btree_map::Iter<'s, String, SignalValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Signing certificate metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Certificate {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    serialno: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    dev: bool,
}

impl Certificate {
    /// Gets the certificate owner.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_ref().map(String::as_str)
    }

    /// Gets the certificate serial number.
    pub fn serial_number(&self) -> Option<&str> {
        self.serialno.as_ref().map(String::as_str)
    }

    /// Gets the certificate creation timestamp.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_ref().map(String::as_str)
    }

    /// Checks if the package is signed with the public Android development certificate.
    pub fn is_dev(&self) -> bool {
        self.dev
    }
}

/// Contents of the `AndroidManifest.xml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    package: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    main_activity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    activities: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    providers: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    receivers: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    services: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    libraries: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    permissions: Vec<String>,
    #[serde(default, rename = "minSDK", deserialize_with = "deserialize_sdk")]
    min_sdk: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    listens_incoming_sms: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    listens_outgoing_call: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    swf: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    permission_gps: bool,
    #[serde(flatten)]
    extra: Signals,
}

impl Manifest {
    /// Gets the package name.
    pub fn package(&self) -> Option<&str> {
        self.package.as_ref().map(String::as_str)
    }

    /// Gets the main activity.
    pub fn main_activity(&self) -> Option<&str> {
        self.main_activity.as_ref().map(String::as_str)
    }

    /// Gets the declared activities.
    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Gets the declared content providers.
    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    /// Gets the declared broadcast receivers.
    pub fn receivers(&self) -> &[String] {
        &self.receivers
    }

    /// Gets the declared services.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Gets the declared libraries.
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    /// Gets the requested permissions.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Gets the minimum SDK required by the application.
    pub fn min_sdk(&self) -> Option<u32> {
        self.min_sdk
    }

    /// Checks if the application listens to incoming SMS messages.
    pub fn listens_incoming_sms(&self) -> bool {
        self.listens_incoming_sms
    }

    /// Checks if the application listens to outgoing calls.
    pub fn listens_outgoing_call(&self) -> bool {
        self.listens_outgoing_call
    }

    /// Checks if the application loads Flash files.
    pub fn swf(&self) -> bool {
        self.swf
    }

    /// Checks if the application asks for a location permission.
    pub fn permission_gps(&self) -> bool {
        self.permission_gps
    }

    /// Any other manifest entry, kept for display.
    pub fn extra(&self) -> &Signals {
        &self.extra
    }
}

/// Complete set of properties of a sample.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PropertyBag {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    sha256: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    sanitized_basename: Option<String>,
    certificate: Certificate,
    manifest: Manifest,
    smali: Signals,
    wide: Signals,
    arm: Signals,
    dex: Signals,
    kits: Signals,
}

impl PropertyBag {
    /// Loads the properties from a JSON reader.
    ///
    /// Fails with [`ErrorKind::InvalidInput`] if a category is missing or the document does not
    /// have the expected structure.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(invalid_input)
    }

    /// Loads the properties from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(invalid_input)
    }

    /// Loads the properties from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|_| format!("could not open the properties file {}", path.display()))?;

        Self::from_reader(BufReader::new(f))
    }

    /// Gets the SHA-256 digest of the sample.
    pub fn sha256(&self) -> Option<&str> {
        self.sha256.as_ref().map(String::as_str)
    }

    /// Gets the sanitized file name of the sample.
    pub fn sanitized_basename(&self) -> Option<&str> {
        self.sanitized_basename.as_ref().map(String::as_str)
    }

    /// Gets the certificate properties.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Gets the manifest properties.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Gets the bytecode-level signals.
    pub fn smali(&self) -> &Signals {
        &self.smali
    }

    /// Gets the asset and resource-level signals.
    pub fn wide(&self) -> &Signals {
        &self.wide
    }

    /// Gets the native library signals.
    pub fn arm(&self) -> &Signals {
        &self.arm
    }

    /// Gets the DEX integrity signals.
    pub fn dex(&self) -> &Signals {
        &self.dex
    }

    /// Gets the detected third-party SDKs.
    pub fn kits(&self) -> &Signals {
        &self.kits
    }
}

fn invalid_input(e: serde_json::Error) -> Error {
    ErrorKind::InvalidInput {
        message: e.to_string(),
    }
    .into()
}

/// Deserializes any signal value.
fn signal_value<'de, D>(deserializer: D) -> Result<SignalValue, D::Error>
where
    D: Deserializer<'de>,
{
    <SignalValue as serde::Deserialize<'de>>::deserialize(deserializer)
}

/// Deserializes a flag. Any value is accepted and reduced to its truthiness.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    signal_value(deserializer).map(|value| value.is_truthy())
}

/// Deserializes an optional text field.
///
/// `null`, `false` and empty strings mean the field is absent. Numbers are kept in their textual
/// form, since serial numbers and timestamps are sometimes extracted as such.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match signal_value(deserializer)? {
        SignalValue::Null | SignalValue::Bool(false) => Ok(None),
        SignalValue::Text(s) => Ok(if s.is_empty() { None } else { Some(s) }),
        SignalValue::Int(i) => Ok(Some(i.to_string())),
        SignalValue::Float(f) => Ok(Some(f.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string, found `{}`",
            other
        ))),
    }
}

/// Deserializes a list of names. `null` and `false` mean an empty list.
fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match signal_value(deserializer)? {
        SignalValue::Null | SignalValue::Bool(false) => Ok(Vec::new()),
        SignalValue::Text(s) => Ok(vec![s]),
        SignalValue::List(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                SignalValue::Text(s) => s,
                other => other.to_string(),
            })
            .collect()),
        other => Err(de::Error::custom(format!(
            "expected a list of names, found `{}`",
            other
        ))),
    }
}

/// Deserializes an SDK level. Missing or non-positive levels are treated as unknown.
fn deserialize_sdk<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match signal_value(deserializer)? {
        SignalValue::Null | SignalValue::Bool(false) => Ok(None),
        SignalValue::Int(i) if i <= 0 => Ok(None),
        SignalValue::Int(i) => Ok(u32::try_from(i).ok()),
        SignalValue::Text(s) => s
            .trim()
            .parse::<u32>()
            .map(|sdk| if sdk == 0 { None } else { Some(sdk) })
            .map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected an SDK level, found `{}`",
            other
        ))),
    }
}

//! Results of the analysis of a sample.
//!
//! A [`Results`] document gathers every section of the report of a sample, already rendered as
//! sentences, so that report generators only need to lay them out.

pub mod console;
mod report;
pub mod sdk_number;

#[cfg(test)]
mod tests;

use crate::{
    analysis::Assessment,
    config::Config,
    properties::{section::Catalog, PropertyBag},
};
use chrono::Local;
use clap::crate_version;
use failure::{Error, ResultExt};
use log::{debug, info, warn};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::{fs, path::PathBuf};

pub use self::report::{Generator, Json, Markdown};
use self::{console::PropertySection, sdk_number::SdkNumber};

/// Disclaimer shown after the list of kits.
const KITS_DISCLAIMER: &str = "Those SDKs are not malicious, but may be undesirable for various \
                               reasons such as privacy leaks, network traffic etc.";

/// Report of a single sample.
#[derive(Debug, Clone)]
pub struct Results {
    name: String,
    sha256: String,
    properties: Vec<PropertySection>,
    min_sdk: Option<SdkNumber>,
    symptoms: Vec<String>,
    summary: Vec<String>,
    details: Vec<String>,
    urls: Vec<String>,
    findings: Vec<String>,
    files: Vec<String>,
    permissions: Vec<String>,
    certificate: Vec<String>,
    assessment: Assessment,
}

impl Results {
    /// Builds the results of the given sample.
    ///
    /// `files` is the list of files installed by the package, as returned by
    /// [`list_files`](crate::utils::list_files).
    pub fn new<S: Into<String>>(
        name: S,
        bag: &PropertyBag,
        catalog: &Catalog,
        files: Vec<String>,
    ) -> Self {
        let assessment = Assessment::new(bag, catalog);

        Self {
            name: name.into(),
            sha256: bag.sha256().unwrap_or_default().to_owned(),
            properties: console::property_sections(bag, catalog),
            min_sdk: bag.manifest().min_sdk().map(SdkNumber::from),
            symptoms: visible_symptoms(bag),
            summary: summary(bag, &assessment),
            details: details(bag),
            urls: bag
                .wide()
                .texts("urls")
                .into_iter()
                .map(str::to_owned)
                .collect(),
            findings: findings(&assessment),
            files,
            permissions: bag.manifest().permissions().to_vec(),
            certificate: certificate(bag),
            assessment,
        }
    }

    /// Gets the name of the sample, used as the name of its results folder.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the SHA-256 digest of the sample, empty if unknown.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Gets the categorized dump of the properties of the sample.
    pub fn properties(&self) -> &[PropertySection] {
        &self.properties
    }

    /// Gets the minimum Android API level required by the sample.
    pub fn min_sdk(&self) -> Option<SdkNumber> {
        self.min_sdk
    }

    /// Gets the visible symptoms.
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Gets the summary sentences.
    pub fn summary(&self) -> &[String] {
        &self.summary
    }

    /// Gets the technical details sentences.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Gets the URLs contacted or referred to by the sample.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Gets the sentences of the peer rules that matched.
    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    /// Gets the files installed by the package.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Gets the permissions requested by the sample.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Gets the certificate details.
    pub fn certificate(&self) -> &[String] {
        &self.certificate
    }

    /// Gets the classification of the sample.
    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    /// Gets the folder where the reports of this sample are written.
    pub fn folder(&self, config: &Config) -> PathBuf {
        config.results_folder().join(&self.name)
    }

    /// Writes the reports selected in the configuration.
    ///
    /// Returns `false` if the results already existed and were kept.
    pub fn generate_report(&self, config: &Config) -> Result<bool, Error> {
        let path = self.folder(config);
        if config.is_force() || !path.exists() {
            if path.exists() {
                debug!(
                    "the results folder {} exists, removing it before generating the reports",
                    path.display()
                );

                if let Err(e) = fs::remove_dir_all(&path) {
                    warn!("there was an error when removing the results folder: {}", e);
                }
            }

            fs::create_dir_all(&path).with_context(|_| {
                format!("could not create the results folder {}", path.display())
            })?;
            debug!("results folder {} created", path.display());

            if config.has_to_generate_json() {
                Json::new()
                    .generate(config, self)
                    .context("there was an error generating the JSON report")?;
                debug!("JSON report generated");
            }

            if config.has_to_generate_markdown() {
                Markdown::new()?
                    .generate(config, self)
                    .context("there was an error generating the Markdown report")?;
                debug!("Markdown report generated");
            }

            Ok(true)
        } else {
            info!(
                "the results for {} have already been generated, skipping report generation",
                self.name
            );
            Ok(false)
        }
    }
}

impl Serialize for Results {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let now = Local::now();
        let mut ser_struct = serializer.serialize_struct("Results", 20)?;

        ser_struct.serialize_field("droid_report_version", crate_version!())?;
        ser_struct.serialize_field("now", &now)?;
        ser_struct.serialize_field("now_rfc2822", &now.to_rfc2822())?;
        ser_struct.serialize_field("now_rfc3339", &now.to_rfc3339())?;

        ser_struct.serialize_field("name", &self.name)?;
        ser_struct.serialize_field("sha256", &self.sha256)?;
        ser_struct.serialize_field("properties", &self.properties)?;
        ser_struct.serialize_field("min_sdk", &self.min_sdk)?;
        ser_struct.serialize_field("symptoms", &self.symptoms)?;
        ser_struct.serialize_field("summary", &self.summary)?;
        ser_struct.serialize_field("details", &self.details)?;
        ser_struct.serialize_field("urls", &self.urls)?;
        ser_struct.serialize_field("capabilities", self.assessment.capabilities())?;
        ser_struct.serialize_field("findings", &self.findings)?;
        ser_struct.serialize_field("files", &self.files)?;
        ser_struct.serialize_field("kits", self.assessment.kits())?;
        ser_struct.serialize_field("kits_disclaimer", KITS_DISCLAIMER)?;
        ser_struct.serialize_field("permissions", &self.permissions)?;
        ser_struct.serialize_field("certificate", &self.certificate)?;
        ser_struct.serialize_field("assessment", &self.assessment)?;

        ser_struct.end()
    }
}

fn visible_symptoms(bag: &PropertyBag) -> Vec<String> {
    let mut symptoms = Vec::new();

    if bag.smali().is_set("send_sms") {
        symptoms.push("Unexpected high bill due to sending SMS messages.".to_owned());
    } else {
        symptoms.push("Unexpected high bill due to Internet traffic.".to_owned());
    }
    if bag.smali().is_set("abort_broadcast") {
        symptoms.push("The victim fails to receive some SMS messages.".to_owned());
    }
    if bag.wide().is_set("coinhive") {
        symptoms.push("The sample mines crypto-currencies.".to_owned());
    }

    symptoms
}

fn summary(bag: &PropertyBag, assessment: &Assessment) -> Vec<String> {
    let smali = bag.smali();
    let mut summary = vec!["This sample targets Android mobile devices.".to_owned()];

    if assessment.is_spyware() {
        summary.push("It spies on its victim.".to_owned());
    }
    if smali.is_set("send_sms") {
        summary.push("It sends SMS messages.".to_owned());
    }
    if smali.is_set("email") {
        summary.push("It sends e-mails.".to_owned());
    }
    if smali.is_set("post") {
        summary.push("It sends information to a remote server.".to_owned());
    }
    if assessment.crypto_mining() {
        summary.push("It mines cryptocurrencies.".to_owned());
    }
    if let Some(version) = bag
        .manifest()
        .min_sdk()
        .map(SdkNumber::from)
        .filter(|sdk| sdk.is_handset_release())
        .and_then(SdkNumber::pretty_version)
    {
        summary.push(format!("It affects Android versions {} and above.", version));
    }

    summary
}

fn details(bag: &PropertyBag) -> Vec<String> {
    let manifest = bag.manifest();
    let mut details = Vec::new();

    if let Some(name) = bag.wide().text("app_name").filter(|name| !name.is_empty()) {
        details.push(format!(
            "The malicious application is typically named '{}'",
            name
        ));
    }
    if let Some(package) = manifest.package() {
        details.push(format!("The sample comes packaged as {}.", package));
    }
    if let Some(activity) = manifest.main_activity() {
        details.push(format!("The main activity is {}.", activity));
    }

    let components = [
        ("activities", manifest.activities()),
        ("providers", manifest.providers()),
        ("receivers", manifest.receivers()),
        ("services", manifest.services()),
        ("libraries", manifest.libraries()),
    ];
    for (kind, names) in components.iter() {
        if !names.is_empty() {
            details.push(format!(
                "The sample defines {} {}: {}.",
                names.len(),
                kind,
                names.join(", ")
            ));
        }
    }

    let network = [
        (bag.smali().is_set("http"), "It uses HTTP."),
        (bag.smali().is_set("post"), "It posts data to remote servers."),
        (bag.smali().is_set("ssh"), "It connects to remote sites via ssh."),
        (
            bag.wide().is_set("apk_zip_url"),
            "It downloads additional zips or applications.",
        ),
        (bag.smali().is_set("json"), "It communicates JSON objects."),
    ];
    details.extend(
        network
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, sentence)| (*sentence).to_owned()),
    );

    details
}

fn findings(assessment: &Assessment) -> Vec<String> {
    let rules = [
        (
            assessment.privacy_exposure(),
            "The sample is likely to be exposing your privacy.",
        ),
        (
            assessment.anti_reversing(),
            "The sample is likely to be using some form of anti-reversing techniques.",
        ),
        (
            assessment.emulator_detection(),
            "The sample detects emulators.",
        ),
        (
            assessment.integrity_compromised(),
            "The sample's integrity has been compromised.",
        ),
        (
            assessment.unusual_dex_magic(),
            "The sample has an unusual DEX header magic. It may be damaged.",
        ),
    ];

    rules
        .iter()
        .filter(|(matched, _)| *matched)
        .map(|(_, sentence)| (*sentence).to_owned())
        .collect()
}

fn certificate(bag: &PropertyBag) -> Vec<String> {
    let certificate = bag.certificate();
    let mut lines = Vec::new();

    if let Some(timestamp) = certificate.timestamp() {
        lines.push(format!(
            "It is likely this sample was created in {}",
            timestamp
        ));
    }
    if let Some(owner) = certificate.owner() {
        lines.push(format!("Certificate owner: {}", owner));
    }
    if let Some(serial_number) = certificate.serial_number() {
        lines.push(format!("Certificate serial no: {}", serial_number));
    }
    if certificate.is_dev() {
        lines.push("The certificate uses the public Android Dev certificate".to_owned());
    }

    lines
}


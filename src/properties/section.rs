//! Section tables translating signal names into human phrases.
//!
//! Each signal category has a table of sections, in a fixed declaration order. A section gives the
//! description of its signal, shown next to it when the properties are printed, and optionally a
//! report phrase, used as a capability when the signal is set.

use serde_derive::{Deserialize, Serialize};
use std::slice::Iter;

/// Source of descriptions, report phrases and section ordering for a signal category.
pub trait CategoryConfig {
    /// Gets the description of the given signal.
    fn description(&self, key: &str) -> Option<&str>;
    /// Gets the report phrase of the given signal.
    fn report(&self, key: &str) -> Option<&str>;
    /// Iterates over the signal names in their declaration order.
    fn sections<'c>(&'c self) -> Box<dyn Iterator<Item = &'c str> + 'c>;
}

/// A single section of a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    key: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    report: Option<String>,
}

impl Section {
    /// Creates a new section.
    pub fn new<K: Into<String>>(key: K, description: Option<&str>, report: Option<&str>) -> Self {
        Self {
            key: key.into(),
            description: description.map(str::to_owned),
            report: report.map(str::to_owned),
        }
    }

    /// Gets the signal name of the section.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Gets the description of the section.
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().map(String::as_str)
    }

    /// Gets the report phrase of the section.
    pub fn report(&self) -> Option<&str> {
        self.report.as_ref().map(String::as_str)
    }
}

/// Ordered table of sections for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    /// Creates a table from the given sections, keeping their order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Built-in table for bytecode-level signals.
    pub fn smali() -> Self {
        Self::from_rows(SMALI_SECTIONS)
    }

    /// Built-in table for asset and resource-level signals.
    pub fn wide() -> Self {
        Self::from_rows(WIDE_SECTIONS)
    }

    /// Built-in table for native library signals.
    pub fn arm() -> Self {
        Self::from_rows(ARM_SECTIONS)
    }

    /// Built-in table for third-party SDKs.
    pub fn kits() -> Self {
        Self::from_rows(KIT_SECTIONS)
    }

    fn from_rows(rows: &[Row]) -> Self {
        Self::new(
            rows.iter()
                .map(|&(key, description, report)| Section::new(key, Some(description), report))
                .collect(),
        )
    }

    /// Finds the first section for the given signal.
    pub fn find(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.key == key)
    }

    /// Iterates over the sections in order.
    pub fn iter(&self) -> Iter<'_, Section> {
        self.sections.iter()
    }

    /// Number of sections in the table.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl CategoryConfig for SectionTable {
    fn description(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(Section::description)
    }

    fn report(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(Section::report)
    }

    fn sections<'c>(&'c self) -> Box<dyn Iterator<Item = &'c str> + 'c> {
        Box::new(self.sections.iter().map(Section::key))
    }
}

/// The section tables of every described category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    smali: SectionTable,
    wide: SectionTable,
    arm: SectionTable,
    kits: SectionTable,
}

impl Catalog {
    /// Creates a catalog from its four tables.
    pub fn new(smali: SectionTable, wide: SectionTable, arm: SectionTable, kits: SectionTable) -> Self {
        Self {
            smali,
            wide,
            arm,
            kits,
        }
    }

    /// Gets the bytecode-level table.
    pub fn smali(&self) -> &SectionTable {
        &self.smali
    }

    /// Gets the asset and resource-level table.
    pub fn wide(&self) -> &SectionTable {
        &self.wide
    }

    /// Gets the native library table.
    pub fn arm(&self) -> &SectionTable {
        &self.arm
    }

    /// Gets the third-party SDK table.
    pub fn kits(&self) -> &SectionTable {
        &self.kits
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(
            SectionTable::smali(),
            SectionTable::wide(),
            SectionTable::arm(),
            SectionTable::kits(),
        )
    }
}

/// Signal name, description and report phrase.
type Row = (&'static str, &'static str, Option<&'static str>);

// The order of these tables is part of the report format: capabilities are listed in it.

const SMALI_SECTIONS: &[Row] = &[
    (
        "abort_broadcast",
        "Aborts the broadcast of received intents",
        Some("Hides incoming SMS messages from the user"),
    ),
    (
        "accessibility",
        "Uses accessibility services",
        Some("Abuses accessibility services"),
    ),
    (
        "device_admin",
        "Requests device administration rights",
        Some("Requests device administrator privileges"),
    ),
    ("alarm", "Schedules alarms", None),
    (
        "android_id",
        "Reads the Android ID",
        Some("Retrieves the Android ID"),
    ),
    ("andy", "Checks for the Andy emulator", None),
    ("base64", "Uses Base64 encoding", None),
    ("bluestacks", "Checks for the BlueStacks emulator", None),
    (
        "bookmarks",
        "Reads browser bookmarks",
        Some("Reads browser bookmarks"),
    ),
    ("call", "Places phone calls", Some("Makes phone calls")),
    ("camera", "Uses the camera", Some("Takes pictures")),
    ("contacts", "Reads contacts", Some("Reads contacts")),
    ("debugger", "Checks if a debugger is attached", None),
    ("email", "Sends e-mails", Some("Sends e-mails")),
    ("emulator", "Checks if it runs in an emulator", None),
    ("encryption", "Uses cryptographic primitives", None),
    ("genymotion", "Checks for the Genymotion emulator", None),
    ("get_imei", "Reads the IMEI", Some("Retrieves the IMEI")),
    ("get_imsi", "Reads the IMSI", Some("Retrieves the IMSI")),
    (
        "get_installed_packages",
        "Lists installed packages",
        Some("Lists installed applications"),
    ),
    (
        "get_line_number",
        "Reads the phone number of the SIM card",
        Some("Retrieves the phone number"),
    ),
    (
        "get_mac",
        "Reads the Wi-Fi MAC address",
        Some("Retrieves the MAC address"),
    ),
    (
        "get_network_operator",
        "Reads the network operator",
        Some("Retrieves the network operator"),
    ),
    ("get_package_info", "Reads package information", None),
    (
        "get_sim_country_iso",
        "Reads the SIM country code",
        Some("Retrieves the SIM country"),
    ),
    (
        "get_sim_operator",
        "Reads the SIM operator",
        Some("Retrieves the SIM operator"),
    ),
    (
        "get_sim_serial_number",
        "Reads the SIM serial number",
        Some("Retrieves the SIM serial number"),
    ),
    ("gps", "Accesses the location", Some("Tracks the device location")),
    ("http", "Uses HTTP", Some("Communicates over HTTP")),
    ("jni", "Uses the Java Native Interface", None),
    ("json", "Handles JSON objects", None),
    ("load_library", "Loads native libraries", None),
    ("nox", "Checks for the Nox emulator", None),
    ("obfuscation", "Code looks obfuscated", None),
    ("package_sig", "Checks its own package signature", None),
    (
        "phone_number",
        "Reads the phone number of calls",
        Some("Monitors phone calls"),
    ),
    (
        "post",
        "Sends HTTP POST requests",
        Some("Posts data to remote servers"),
    ),
    (
        "receive_sms",
        "Receives SMS messages",
        Some("Reads incoming SMS messages"),
    ),
    ("record_audio", "Records audio", Some("Records audio")),
    ("reflection", "Uses Java reflection", None),
    ("send_sms", "Sends SMS messages", Some("Sends SMS messages")),
    ("ssh", "Uses SSH", Some("Connects to remote hosts via SSH")),
    ("uuid", "Generates unique identifiers", None),
];

const WIDE_SECTIONS: &[Row] = &[
    ("app_name", "Name of the application", None),
    (
        "apk_zip_url",
        "References URLs of APK or ZIP files",
        Some("Downloads additional applications or archives"),
    ),
    (
        "coinhive",
        "Embeds the CoinHive miner",
        Some("Mines cryptocurrencies with CoinHive"),
    ),
    (
        "cryptoloot",
        "Embeds the CryptoLoot miner",
        Some("Mines cryptocurrencies with CryptoLoot"),
    ),
    ("gps", "Accesses the location", Some("Tracks the device location")),
    ("miner", "Embeds a cryptocurrency miner", Some("Mines cryptocurrencies")),
    ("mms", "Sends MMS messages", Some("Sends MMS messages")),
    ("qemu", "Checks for QEMU properties", None),
    ("urls", "URLs found in the resources", None),
];

const ARM_SECTIONS: &[Row] = &[
    ("busybox", "Embeds or calls BusyBox", None),
    (
        "pm_list",
        "Lists installed packages from native code",
        Some("Lists installed applications from native code"),
    ),
    (
        "ptrace",
        "Uses ptrace",
        Some("Tampers with other processes"),
    ),
    ("su", "Calls su", Some("Tries to gain root privileges")),
];

const KIT_SECTIONS: &[Row] = &[
    ("admob", "Google AdMob advertising SDK", Some("Google AdMob")),
    ("airpush", "Airpush advertising SDK", Some("Airpush")),
    ("appsflyer", "AppsFlyer attribution SDK", Some("AppsFlyer")),
    ("crashlytics", "Crashlytics crash reporting SDK", Some("Crashlytics")),
    ("facebook", "Facebook SDK", Some("Facebook SDK")),
    ("firebase", "Google Firebase SDK", Some("Google Firebase")),
    ("flurry", "Flurry analytics SDK", Some("Flurry Analytics")),
    (
        "google_analytics",
        "Google Analytics SDK",
        Some("Google Analytics"),
    ),
    ("mopub", "MoPub advertising SDK", Some("MoPub")),
    ("unity_ads", "Unity Ads advertising SDK", Some("Unity Ads")),
    ("zbar", "ZBar barcode reader library", None),
];

//! Signal aggregation and heuristic classification.
//!
//! Everything in this module is a pure function of a [`PropertyBag`]: the bag is only borrowed,
//! and every call produces fresh values.


use crate::properties::{
    section::{Catalog, CategoryConfig},
    PropertyBag, Signals,
};
use log::debug;
use serde_derive::Serialize;

/// Minimum number of sensitive data groups needed to consider a sample a spyware.
pub const MIN_SENSITIVE_DATA: usize = 3;

/// Named group of signals, counted once if any of its signals is set.
pub struct SignalGroup {
    name: &'static str,
    matches: fn(&PropertyBag) -> bool,
}

impl SignalGroup {
    /// Gets the name of the group.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Checks if any signal of the group is set in the given bag.
    pub fn matches(&self, bag: &PropertyBag) -> bool {
        (self.matches)(bag)
    }
}

/// Groups of signals revealing access to sensitive data.
pub static SENSITIVE_DATA_GROUPS: [SignalGroup; 8] = [
    SignalGroup {
        name: "location",
        matches: |bag| {
            bag.manifest().permission_gps() || bag.smali().is_set("gps") || bag.wide().is_set("gps")
        },
    },
    SignalGroup {
        name: "phone number",
        matches: |bag| bag.smali().is_set("get_line_number"),
    },
    SignalGroup {
        name: "camera",
        matches: |bag| bag.smali().is_set("camera"),
    },
    SignalGroup {
        name: "bookmarks",
        matches: |bag| bag.smali().is_set("bookmarks"),
    },
    SignalGroup {
        name: "IMSI",
        matches: |bag| bag.smali().is_set("get_imsi"),
    },
    SignalGroup {
        name: "MAC address",
        matches: |bag| bag.smali().is_set("get_mac"),
    },
    SignalGroup {
        name: "incoming SMS",
        matches: |bag| bag.smali().is_set("receive_sms") || bag.manifest().listens_incoming_sms(),
    },
    SignalGroup {
        name: "calls",
        matches: |bag| bag.manifest().listens_outgoing_call() || bag.smali().is_set("phone_number"),
    },
];

/// Groups of signals revealing a way to send data out of the device.
pub static PROTOCOL_GROUPS: [SignalGroup; 3] = [
    SignalGroup {
        name: "SMS",
        matches: |bag| bag.smali().is_set("send_sms"),
    },
    SignalGroup {
        name: "network",
        matches: |bag| {
            let smali = bag.smali();
            smali.is_set("http") || smali.is_set("post") || smali.is_set("ssh")
        },
    },
    SignalGroup {
        name: "MMS",
        matches: |bag| bag.wide().is_set("mms"),
    },
];

fn count_groups(groups: &[SignalGroup], bag: &PropertyBag) -> usize {
    groups.iter().filter(|group| group.matches(bag)).count()
}

/// Number of sensitive data groups matched by the sample.
pub fn sensitive_data_count(bag: &PropertyBag) -> usize {
    count_groups(&SENSITIVE_DATA_GROUPS, bag)
}

/// Number of protocol groups matched by the sample.
pub fn protocol_count(bag: &PropertyBag) -> usize {
    count_groups(&PROTOCOL_GROUPS, bag)
}

/// Guesses if the sample is likely to be a spyware.
///
/// A sample is a spyware if it has at least one way of sending data out and accesses at least
/// [`MIN_SENSITIVE_DATA`] kinds of sensitive data.
pub fn is_spyware(bag: &PropertyBag) -> bool {
    let sensitive_data = sensitive_data_count(bag);
    let protocols = protocol_count(bag);
    debug!(
        "spyware heuristic: {} sensitive data group(s), {} protocol group(s)",
        sensitive_data, protocols
    );

    protocols > 0 && sensitive_data >= MIN_SENSITIVE_DATA
}

/// Lists the capabilities of the sample.
///
/// Manifest capabilities come first, then the report phrases of the set `smali`, `wide` and `arm`
/// signals, each category in the declaration order of its table. Phrases have no trailing
/// punctuation and are not deduplicated.
pub fn capabilities(bag: &PropertyBag, catalog: &Catalog) -> Vec<String> {
    let manifest = bag.manifest();
    let smali = bag.smali();
    let mut capabilities = Vec::new();

    if manifest.listens_incoming_sms() {
        capabilities.push("Listens to incoming SMS messages".to_owned());
    }
    if manifest.listens_outgoing_call() {
        capabilities.push("Listens to outgoing calls".to_owned());
    }
    if manifest.swf() {
        capabilities.push("Loads Flash files".to_owned());
    }
    if !manifest.services().is_empty() {
        capabilities.push("Runs in background".to_owned());
    }
    if !manifest.libraries().is_empty() || smali.is_set("load_library") || smali.is_set("jni") {
        capabilities.push("Loads external libraries".to_owned());
    }

    push_reports(catalog.smali(), smali, &mut capabilities);
    push_reports(catalog.wide(), bag.wide(), &mut capabilities);
    push_reports(catalog.arm(), bag.arm(), &mut capabilities);

    capabilities
}

/// Adds the report phrase of every set signal, in section order.
fn push_reports<C>(config: &C, signals: &Signals, capabilities: &mut Vec<String>)
where
    C: CategoryConfig + ?Sized,
{
    for section in config.sections() {
        if signals.is_set(section) {
            if let Some(report) = config.report(section) {
                capabilities.push(report.to_owned());
            }
        }
    }
}

/// Lists the detected third-party SDKs.
///
/// Kits are listed in lexicographic order of their names, not in table order. Each one is shown
/// with its report phrase, or with its name if it has none.
pub fn list_kits<C>(bag: &PropertyBag, kits: &C) -> Vec<String>
where
    C: CategoryConfig + ?Sized,
{
    bag.kits()
        .iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(key, _)| kits.report(key).unwrap_or(key.as_str()).to_owned())
        .collect()
}

fn any_set(signals: &Signals, keys: &[&str]) -> bool {
    keys.iter().any(|key| signals.is_set(key))
}

/// Checks if the sample is likely to expose the privacy of the user.
pub fn exposes_privacy(bag: &PropertyBag) -> bool {
    any_set(
        bag.smali(),
        &[
            "android_id",
            "get_imei",
            "get_imsi",
            "get_installed_packages",
            "get_line_number",
            "get_mac",
            "get_network_operator",
            "get_package_info",
            "get_sim_country_iso",
            "get_sim_serial_number",
            "get_sim_operator",
            "gps",
            "uuid",
        ],
    ) || bag.arm().is_set("pm_list")
}

/// Checks if the sample is likely to use anti-reversing techniques.
pub fn uses_anti_reversing(bag: &PropertyBag) -> bool {
    any_set(
        bag.smali(),
        &[
            "base64",
            "debugger",
            "encryption",
            "obfuscation",
            "package_sig",
            "reflection",
        ],
    ) || bag.wide().is_set("qemu")
}

/// Checks if the sample detects emulators.
pub fn detects_emulators(bag: &PropertyBag) -> bool {
    any_set(
        bag.smali(),
        &["emulator", "nox", "bluestacks", "genymotion", "andy"],
    )
}

/// Checks if the checksums of the DEX file do not match its contents.
pub fn integrity_compromised(bag: &PropertyBag) -> bool {
    any_set(bag.dex(), &["bad_sha1", "bad_adler32"])
}

/// Checks if the DEX file has an unknown header magic.
pub fn has_unusual_dex_magic(bag: &PropertyBag) -> bool {
    bag.dex().is_set("magic_unknown")
}

/// Checks if the sample embeds a cryptocurrency miner.
pub fn mines_cryptocurrencies(bag: &PropertyBag) -> bool {
    any_set(bag.wide(), &["miner", "cryptoloot", "coinhive"])
}

/// All the judgments derived from a property bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    capabilities: Vec<String>,
    spyware: bool,
    sensitive_data: usize,
    protocols: usize,
    kits: Vec<String>,
    privacy_exposure: bool,
    anti_reversing: bool,
    emulator_detection: bool,
    integrity_compromised: bool,
    unusual_dex_magic: bool,
    crypto_mining: bool,
}

impl Assessment {
    /// Runs every classifier on the given bag.
    pub fn new(bag: &PropertyBag, catalog: &Catalog) -> Self {
        Self {
            capabilities: capabilities(bag, catalog),
            spyware: is_spyware(bag),
            sensitive_data: sensitive_data_count(bag),
            protocols: protocol_count(bag),
            kits: list_kits(bag, catalog.kits()),
            privacy_exposure: exposes_privacy(bag),
            anti_reversing: uses_anti_reversing(bag),
            emulator_detection: detects_emulators(bag),
            integrity_compromised: integrity_compromised(bag),
            unusual_dex_magic: has_unusual_dex_magic(bag),
            crypto_mining: mines_cryptocurrencies(bag),
        }
    }

    /// Gets the capabilities of the sample.
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Checks if the sample was classified as a spyware.
    pub fn is_spyware(&self) -> bool {
        self.spyware
    }

    /// Gets the number of sensitive data groups matched.
    pub fn sensitive_data(&self) -> usize {
        self.sensitive_data
    }

    /// Gets the number of protocol groups matched.
    pub fn protocols(&self) -> usize {
        self.protocols
    }

    /// Gets the detected kits.
    pub fn kits(&self) -> &[String] {
        &self.kits
    }

    /// Checks if the sample exposes the privacy of the user.
    pub fn privacy_exposure(&self) -> bool {
        self.privacy_exposure
    }

    /// Checks if the sample uses anti-reversing techniques.
    pub fn anti_reversing(&self) -> bool {
        self.anti_reversing
    }

    /// Checks if the sample detects emulators.
    pub fn emulator_detection(&self) -> bool {
        self.emulator_detection
    }

    /// Checks if the DEX integrity is compromised.
    pub fn integrity_compromised(&self) -> bool {
        self.integrity_compromised
    }

    /// Checks if the DEX header magic is unusual.
    pub fn unusual_dex_magic(&self) -> bool {
        self.unusual_dex_magic
    }

    /// Checks if the sample mines cryptocurrencies.
    pub fn crypto_mining(&self) -> bool {
        self.crypto_mining
    }
}

//! Tests for the report of a sample.

use super::{Markdown, Results};
use crate::{
    config::Config,
    properties::{section::Catalog, PropertyBag},
};
use serde_json::{json, Value};
use std::{env, fs, path::PathBuf};

fn spyware_bag() -> PropertyBag {
    PropertyBag::from_value(json!({
        "sha256": "9f86d081884c7d659a2feaa0c55ad015",
        "sanitized_basename": "flashlight.apk",
        "certificate": {
            "owner": "CN=Android Debug, O=Android, C=US",
            "serialno": "0x4f3a",
            "timestamp": "2018-03-01 10:00:00",
            "dev": true
        },
        "manifest": {
            "package": "com.example.flashlight",
            "main_activity": "com.example.flashlight.MainActivity",
            "services": ["Updater", "Sync"],
            "receivers": ["SmsReceiver"],
            "permissions": ["android.permission.SEND_SMS", "android.permission.CAMERA"],
            "minSDK": 9,
            "listens_incoming_sms": true,
            "permission_gps": true
        },
        "smali": {
            "send_sms": true,
            "abort_broadcast": true,
            "camera": true,
            "get_imsi": true,
            "http": true,
            "post": true,
            "emulator": true
        },
        "wide": {
            "app_name": "Flashlight",
            "urls": ["http://c2.example.com/gate.php"],
            "coinhive": true
        },
        "arm": {},
        "dex": { "bad_sha1": true },
        "kits": { "admob": true, "zbar": false }
    }))
    .unwrap()
}

fn empty_bag() -> PropertyBag {
    PropertyBag::from_value(json!({
        "certificate": {},
        "manifest": {},
        "smali": {},
        "wide": {},
        "arm": {},
        "dex": {},
        "kits": {}
    }))
    .unwrap()
}

fn temp_results_folder(test: &str) -> PathBuf {
    let folder = env::temp_dir().join(format!(
        "droid-report-{}-{}",
        test,
        std::process::id()
    ));
    if folder.exists() {
        fs::remove_dir_all(&folder).unwrap();
    }
    folder
}

#[test]
fn it_builds_the_sentences() {
    let results = Results::new(
        "flashlight.apk",
        &spyware_bag(),
        &Catalog::default(),
        Vec::new(),
    );

    assert_eq!(results.name(), "flashlight.apk");
    assert_eq!(results.sha256(), "9f86d081884c7d659a2feaa0c55ad015");
    assert_eq!(
        results.symptoms(),
        &[
            "Unexpected high bill due to sending SMS messages.",
            "The victim fails to receive some SMS messages.",
            "The sample mines crypto-currencies.",
        ]
    );
    assert_eq!(
        results.summary(),
        &[
            "This sample targets Android mobile devices.",
            "It spies on its victim.",
            "It sends SMS messages.",
            "It sends information to a remote server.",
            "It mines cryptocurrencies.",
            "It affects Android versions 2.3 and above.",
        ]
    );
    assert_eq!(
        results.details(),
        &[
            "The malicious application is typically named 'Flashlight'",
            "The sample comes packaged as com.example.flashlight.",
            "The main activity is com.example.flashlight.MainActivity.",
            "The sample defines 1 receivers: SmsReceiver.",
            "The sample defines 2 services: Updater, Sync.",
            "It uses HTTP.",
            "It posts data to remote servers.",
        ]
    );
    assert_eq!(results.urls(), &["http://c2.example.com/gate.php"]);
    assert_eq!(
        results.findings(),
        &[
            "The sample is likely to be exposing your privacy.",
            "The sample detects emulators.",
            "The sample's integrity has been compromised.",
        ]
    );
    assert_eq!(
        results.permissions(),
        &["android.permission.SEND_SMS", "android.permission.CAMERA"]
    );
    assert_eq!(
        results.certificate(),
        &[
            "It is likely this sample was created in 2018-03-01 10:00:00",
            "Certificate owner: CN=Android Debug, O=Android, C=US",
            "Certificate serial no: 0x4f3a",
            "The certificate uses the public Android Dev certificate",
        ]
    );
    assert!(results.assessment().is_spyware());
    assert_eq!(results.assessment().kits(), &["Google AdMob"]);
}

#[test]
fn it_builds_minimal_sentences() {
    let results = Results::new("sample", &empty_bag(), &Catalog::default(), Vec::new());

    assert_eq!(results.sha256(), "");
    assert_eq!(
        results.symptoms(),
        &["Unexpected high bill due to Internet traffic."]
    );
    assert_eq!(
        results.summary(),
        &["This sample targets Android mobile devices."]
    );
    assert!(results.details().is_empty());
    assert!(results.urls().is_empty());
    assert!(results.findings().is_empty());
    assert!(results.certificate().is_empty());
    assert!(!results.assessment().is_spyware());
}

#[test]
fn it_skips_unknown_android_versions() {
    let bag = PropertyBag::from_value(json!({
        "certificate": {},
        "manifest": { "minSDK": 42 },
        "smali": {},
        "wide": {},
        "arm": {},
        "dex": {},
        "kits": {}
    }))
    .unwrap();
    let results = Results::new("sample", &bag, &Catalog::default(), Vec::new());

    assert!(results
        .summary()
        .iter()
        .all(|sentence| !sentence.starts_with("It affects Android versions")));
}

#[test]
fn it_skips_watch_only_android_versions() {
    let bag = PropertyBag::from_value(json!({
        "certificate": {},
        "manifest": { "minSDK": 20 },
        "smali": {},
        "wide": {},
        "arm": {},
        "dex": {},
        "kits": {}
    }))
    .unwrap();
    let results = Results::new("sample", &bag, &Catalog::default(), Vec::new());

    assert_eq!(
        results.summary(),
        &["This sample targets Android mobile devices."]
    );
}

#[test]
fn it_renders_the_property_dump() {
    let results = Results::new(
        "flashlight.apk",
        &spyware_bag(),
        &Catalog::default(),
        Vec::new(),
    );
    let report = Markdown::new().unwrap().render(&results).unwrap();
    let key = |key: &str| format!("{:20.20}: ", key);

    assert!(report.contains("## Properties"));
    for title in &[
        "Certificate properties",
        "Manifest properties",
        "Smali properties",
        "Wide properties",
        "ARM properties",
        "DEX properties",
        "Kit properties",
    ] {
        assert!(report.contains(title), "missing {}", title);
    }
    assert!(report.contains(&format!("{}true (Sends SMS messages)\n", key("send_sms"))));
    assert!(report.contains(&format!("{}true\n", key("bad_sha1"))));
    assert!(report.contains(&format!("{}false\n", key("zbar"))));
    assert!(report.contains(&format!("{}9\n", key("minSDK"))));

    let dump = report.find("## Properties").unwrap();
    let symptoms = report.find("## Visible symptoms").unwrap();
    assert!(dump < symptoms);
}

#[test]
fn it_renders_markdown() {
    let files = vec!["./classes.dex".to_owned(), "./lib/libpayload.so".to_owned()];
    let results = Results::new(
        "flashlight.apk",
        &spyware_bag(),
        &Catalog::default(),
        files,
    );
    let report = Markdown::new().unwrap().render(&results).unwrap();

    assert!(report.starts_with("# 9f86d081884c7d659a2feaa0c55ad015\n"));
    for section in &[
        "## Visible symptoms",
        "## Summary",
        "## Technical details",
        "## URLs",
        "## Detected Features / Capabilities",
        "## Files",
        "## Kits",
        "## Permissions",
        "## Certificate details",
    ] {
        assert!(report.contains(section), "missing {}", section);
    }
    assert!(report.contains("- Takes pictures\n"));
    assert!(report.contains("- Listens to incoming SMS messages\n"));
    assert!(report.contains("- ./lib/libpayload.so\n"));
    assert!(report.contains("- Google AdMob\n"));
    assert!(report.contains("Those SDKs are not malicious"));
    assert!(report.contains("The sample's integrity has been compromised."));
    assert!(report.contains("It is likely this sample was created in 2018-03-01 10:00:00"));
}

#[test]
fn it_renders_markdown_without_optional_sections() {
    let results = Results::new("sample", &empty_bag(), &Catalog::default(), Vec::new());
    let report = Markdown::new().unwrap().render(&results).unwrap();

    assert!(report.starts_with("# sample\n"));
    assert!(report.contains("## Certificate details"));
    for section in &["## URLs", "## Detected Features", "## Files", "## Kits", "## Permissions"] {
        assert!(!report.contains(section), "unexpected {}", section);
    }
}

#[test]
fn it_serializes_the_results() {
    let results = Results::new(
        "flashlight.apk",
        &spyware_bag(),
        &Catalog::default(),
        Vec::new(),
    );
    let value = serde_json::to_value(&results).unwrap();

    assert_eq!(value["name"], "flashlight.apk");
    assert_eq!(value["kits"], json!(["Google AdMob"]));
    assert_eq!(value["assessment"]["spyware"], Value::Bool(true));
    assert!(value["capabilities"]
        .as_array()
        .unwrap()
        .contains(&json!("Sends SMS messages")));
    assert_eq!(
        value["min_sdk"],
        json!({ "api": 9, "name": "Gingerbread", "version": "2.3" })
    );
    let smali = value["properties"]
        .as_array()
        .unwrap()
        .iter()
        .find(|section| section["title"] == "Smali properties / What the Dalvik code does")
        .unwrap();
    assert!(smali["lines"]
        .as_array()
        .unwrap()
        .iter()
        .any(|line| line["key"] == "send_sms" && line["set"] == true));
    assert!(value["droid_report_version"].is_string());
    assert!(value["now_rfc3339"].is_string());
}

#[test]
fn it_generates_reports() {
    let folder = temp_results_folder("generate");
    let mut config = Config::default();
    config.set_results_folder(&folder);
    config.set_reports(true, true);

    let results = Results::new(
        "flashlight.apk",
        &spyware_bag(),
        &Catalog::default(),
        Vec::new(),
    );
    let sample_folder = results.folder(&config);
    assert_eq!(sample_folder, folder.join("flashlight.apk"));

    assert!(results.generate_report(&config).unwrap());
    assert!(sample_folder.join("report.md").is_file());
    assert!(sample_folder.join("results.json").is_file());

    let json: Value =
        serde_json::from_str(&fs::read_to_string(sample_folder.join("results.json")).unwrap())
            .unwrap();
    assert_eq!(json["sha256"], "9f86d081884c7d659a2feaa0c55ad015");

    // Existing results are kept unless forced.
    fs::write(sample_folder.join("stale.txt"), b"stale").unwrap();
    assert!(!results.generate_report(&config).unwrap());
    assert!(sample_folder.join("stale.txt").exists());

    config.set_force(true);
    assert!(results.generate_report(&config).unwrap());
    assert!(!sample_folder.join("stale.txt").exists());
    assert!(sample_folder.join("report.md").is_file());

    fs::remove_dir_all(&folder).unwrap();
}

#[test]
fn it_generates_only_selected_reports() {
    let folder = temp_results_folder("selected");
    let mut config = Config::default();
    config.set_results_folder(&folder);
    config.set_reports(false, true);

    let results = Results::new("sample", &empty_bag(), &Catalog::default(), Vec::new());
    assert!(results.generate_report(&config).unwrap());
    assert!(results.folder(&config).join("results.json").is_file());
    assert!(!results.folder(&config).join("report.md").exists());

    fs::remove_dir_all(&folder).unwrap();
}

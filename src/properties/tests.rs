//! Tests for the property bag.

use super::{
    section::{Catalog, CategoryConfig, Section, SectionTable},
    PropertyBag, SignalValue, Signals,
};
use crate::error::ErrorKind;
use serde_json::json;

fn full_document() -> serde_json::Value {
    json!({
        "sha256": "0a1b2c",
        "sanitized_basename": "sample.apk",
        "certificate": {
            "owner": "CN=Android Debug, O=Android, C=US",
            "serialno": 936_237_012,
            "timestamp": false,
            "dev": true
        },
        "manifest": {
            "package": "com.example.sample",
            "main_activity": null,
            "activities": ["com.example.sample.Main"],
            "services": ["S1", "S2"],
            "libraries": null,
            "permissions": ["android.permission.INTERNET"],
            "minSDK": 9,
            "listens_incoming_sms": true,
            "listens_outgoing_call": false,
            "swf": false,
            "permission_gps": false,
            "targetSDK": 19
        },
        "smali": { "send_sms": true, "http": false },
        "wide": { "app_name": "Sample", "urls": ["http://a.example", "http://b.example"] },
        "arm": {},
        "dex": { "bad_sha1": false },
        "kits": { "admob": true }
    })
}

#[test]
fn it_loads_a_full_bag() {
    let bag = PropertyBag::from_value(full_document()).unwrap();

    assert_eq!(bag.sha256(), Some("0a1b2c"));
    assert_eq!(bag.sanitized_basename(), Some("sample.apk"));

    let certificate = bag.certificate();
    assert_eq!(certificate.owner(), Some("CN=Android Debug, O=Android, C=US"));
    assert_eq!(certificate.serial_number(), Some("936237012"));
    assert_eq!(certificate.timestamp(), None);
    assert!(certificate.is_dev());

    let manifest = bag.manifest();
    assert_eq!(manifest.package(), Some("com.example.sample"));
    assert_eq!(manifest.main_activity(), None);
    assert_eq!(manifest.activities(), ["com.example.sample.Main"]);
    assert_eq!(manifest.services().len(), 2);
    assert!(manifest.libraries().is_empty());
    assert!(manifest.providers().is_empty());
    assert_eq!(manifest.min_sdk(), Some(9));
    assert!(manifest.listens_incoming_sms());
    assert!(!manifest.listens_outgoing_call());
    assert_eq!(manifest.extra().get("targetSDK"), Some(&SignalValue::Int(19)));

    assert!(bag.smali().is_set("send_sms"));
    assert!(!bag.smali().is_set("http"));
    assert_eq!(bag.wide().text("app_name"), Some("Sample"));
    assert_eq!(
        bag.wide().texts("urls"),
        vec!["http://a.example", "http://b.example"]
    );
    assert!(bag.arm().is_empty());
    assert!(bag.kits().is_set("admob"));
}

#[test]
fn it_rejects_a_bag_without_a_category() {
    let mut document = full_document();
    let _ = document.as_object_mut().unwrap().remove("smali");

    let error = PropertyBag::from_value(document).unwrap_err();
    match error.downcast_ref::<ErrorKind>() {
        Some(ErrorKind::InvalidInput { message }) => assert!(message.contains("smali")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn it_rejects_nested_objects_as_signals() {
    let mut document = full_document();
    document["smali"] = json!({ "send_sms": { "nested": true } });

    let error = PropertyBag::from_value(document).unwrap_err();
    assert!(error.downcast_ref::<ErrorKind>().is_some());
}

#[test]
fn it_loads_from_a_reader() {
    let text = full_document().to_string();
    let bag = PropertyBag::from_reader(text.as_bytes()).unwrap();

    assert_eq!(bag.manifest().package(), Some("com.example.sample"));
}

#[test]
fn it_signal_truthiness() {
    assert!(!SignalValue::Null.is_truthy());
    assert!(!SignalValue::Bool(false).is_truthy());
    assert!(SignalValue::Bool(true).is_truthy());
    assert!(!SignalValue::Int(0).is_truthy());
    assert!(SignalValue::Int(3).is_truthy());
    assert!(!SignalValue::Float(0.0).is_truthy());
    assert!(!SignalValue::from("").is_truthy());
    assert!(SignalValue::from("Sample").is_truthy());
    assert!(!SignalValue::List(Vec::new()).is_truthy());
    assert!(SignalValue::from(vec!["http://a.example"]).is_truthy());
}

#[test]
fn it_signal_display() {
    assert_eq!(SignalValue::Null.to_string(), "None");
    assert_eq!(SignalValue::Bool(true).to_string(), "true");
    assert_eq!(SignalValue::Int(42).to_string(), "42");
    assert_eq!(
        SignalValue::from(vec!["a", "b"]).to_string(),
        "[a, b]"
    );
}

#[test]
fn it_missing_signals_are_not_set() {
    let signals: Signals = vec![("http", true), ("post", false)].into_iter().collect();

    assert!(signals.is_set("http"));
    assert!(!signals.is_set("post"));
    assert!(!signals.is_set("ssh"));
    assert_eq!(signals.text("http"), None);
    assert!(signals.texts("urls").is_empty());
}

#[test]
fn it_signals_iterate_in_key_order() {
    let signals: Signals = vec![("zbar", false), ("facebook", true), ("admob", true)]
        .into_iter()
        .collect();

    let keys: Vec<&str> = signals.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["admob", "facebook", "zbar"]);
}

#[test]
fn it_section_table_lookups() {
    let table = SectionTable::new(vec![
        Section::new("send_sms", Some("Sends SMS messages"), Some("Sends SMS")),
        Section::new("json", Some("Handles JSON objects"), None),
    ]);

    assert_eq!(table.description("send_sms"), Some("Sends SMS messages"));
    assert_eq!(table.report("send_sms"), Some("Sends SMS"));
    assert_eq!(table.description("json"), Some("Handles JSON objects"));
    assert_eq!(table.report("json"), None);
    assert_eq!(table.report("unknown"), None);
    assert_eq!(table.sections().collect::<Vec<_>>(), vec!["send_sms", "json"]);
}

#[test]
fn it_builtin_tables_have_unique_keys() {
    let catalog = Catalog::default();
    for table in &[catalog.smali(), catalog.wide(), catalog.arm(), catalog.kits()] {
        let mut keys: Vec<&str> = table.sections().collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert!(table.iter().all(|section| section.description().is_some()));
    }
}

//! Scalar accessor tests
//!
//! Round trips for every supported type, lenient boolean spellings, and the
//! strict/tolerant split on absent, null and corrupt values.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use jsonbind::{
    Accessor, Document, FaultKind,
    tree::{NodeKind, Scalar},
    view::{ParseFailure, ValueType},
};
use serde_json::json;
use uuid::Uuid;

fn accessor() -> Accessor {
    Accessor::new("values")
}

fn round_trip<T>(value: T)
where
    T: ValueType + PartialEq + std::fmt::Debug + Clone,
{
    let doc = Document::new();
    let json = accessor();
    let root = doc.root();

    json.set(&root, "v", &value).unwrap();
    assert_eq!(json.get::<T>(&root, "v").unwrap(), value);
    assert_eq!(json.get_opt::<T>(&root, "v").unwrap(), Some(value.clone()));
    assert_eq!(json.get_or::<T>(&root, "v", value.clone()).unwrap(), value);

    // Survives a trip through JSON text as well
    let reparsed = Document::parse(&doc.to_value().to_string()).unwrap();
    assert_eq!(json.get::<T>(&reparsed.root(), "v").unwrap(), value);
}

// ===== ROUND TRIPS =====

#[test]
fn test_round_trip_every_type() {
    round_trip("plain text".to_string());
    round_trip(String::new());
    round_trip(i32::MIN);
    round_trip(i32::MAX);
    round_trip(i64::MIN);
    round_trip(true);
    round_trip(false);
    round_trip(Uuid::new_v4());
    round_trip(Utc.with_ymd_and_hms(2020, 2, 29, 12, 0, 0).unwrap());
    round_trip(
        FixedOffset::east_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2021, 7, 4, 9, 15, 30)
            .unwrap(),
    );
}

#[test]
fn test_round_trip_extended_years() {
    round_trip(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap());
    round_trip(Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap());
    round_trip(
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(12345, 6, 7, 8, 9, 10)
            .unwrap(),
    );

    let doc = Document::new();
    let json = accessor();
    let stored = json
        .set(&doc.root(), "d", &Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap())
        .unwrap();
    assert_eq!(stored, Scalar::from("+10000-01-01T00:00:00Z"));
}

// ===== LENIENT BOOLEANS =====

#[test]
fn test_boolean_spellings() {
    let doc = Document::from_value(json!({
        "yes": "yes", "y": "Y", "on": "ON", "one": "1",
        "no": "no", "n": "N", "off": "OFF", "zero": "0",
        "bad": "perhaps",
    }));
    let json = accessor();
    let root = doc.root();

    for key in ["yes", "y", "on", "one"] {
        assert!(json.get::<bool>(&root, key).unwrap(), "key {key}");
    }
    for key in ["no", "n", "off", "zero"] {
        assert!(!json.get::<bool>(&root, key).unwrap(), "key {key}");
    }
    let err = json.get::<bool>(&root, "bad").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UnparsableValue));
    assert_eq!(err.fault().unwrap().actual(), NodeKind::String);
}

// ===== INTEGER OVERFLOW =====

#[test]
fn test_integer_overflow_is_unparsable() {
    let doc = Document::parse(
        r#"{"huge": 18446744073709551615, "wide": 4294967296, "ratio": 0.5}"#,
    )
    .unwrap();
    let json = accessor();
    let root = doc.root();

    let err = json.get::<i64>(&root, "huge").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UnparsableValue));
    assert_eq!(err.fault().unwrap().actual(), NodeKind::Float);
    let err = json.get::<i32>(&root, "huge").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UnparsableValue));
    let err = json.get::<i32>(&root, "wide").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UnparsableValue));
    assert_eq!(json.get::<i64>(&root, "wide").unwrap(), 4_294_967_296);

    // A fractional number is simply not an integer
    let err = json.get_opt::<i64>(&root, "ratio").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::WrongNodeType));
}

// ===== STRICT AND TOLERANT =====

#[test]
fn test_tolerant_defaults() {
    let doc = Document::from_value(json!({"n": null, "corrupt": "x12"}));
    let json = accessor();
    let root = doc.root();

    assert_eq!(json.get_or(&root, "absent", 7).unwrap(), 7);
    assert_eq!(json.get_or(&root, "n", 7).unwrap(), 7);
    let err = json.get_or(&root, "corrupt", 7).unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::UnparsableValue));
}

#[test]
fn test_strict_reads_report_property_and_label() {
    let doc = Document::from_value(json!({"n": null}));
    let json = Accessor::new("settings");
    let root = doc.root();

    let err = json.get::<i64>(&root, "absent").unwrap_err();
    let fault = err.fault().unwrap();
    assert_eq!(fault.label(), "settings");
    assert_eq!(fault.property(), "absent");
    assert_eq!(fault.expected(), "Int64");
    assert_eq!(fault.kind(), FaultKind::MissingProperty);
    assert!(err.is_not_found());

    let err = json.get::<i64>(&root, "n").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::NullNotAllowed));
    assert!(err.is_parse_error());
}

#[test]
fn test_null_subject_is_reported() {
    let doc = Document::from_value(json!({"child": null}));
    let json = accessor();
    let child = doc.root().get("child").unwrap();

    let err = json.get::<String>(&child, "x").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::NullDocument));
    let err = json.set(&child, "x", &1).unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::NullDocument));
}

#[test]
fn test_set_replaces_other_kinds() {
    let doc = Document::from_value(json!({"v": {"nested": true}}));
    let json = accessor();
    let root = doc.root();

    let stored = json.set(&root, "v", &12).unwrap();
    assert_eq!(stored, Scalar::Integer(12));
    assert_eq!(doc.to_value(), json!({"v": 12}));
}

// ===== CUSTOM STRATEGIES =====

/// Percentage stored as "NN%"
#[derive(Debug, Clone, Copy, PartialEq)]
struct Percent(u8);

impl ValueType for Percent {
    const TYPE_NAME: &'static str = "Percent";

    fn parse(scalar: &Scalar) -> Result<Self, ParseFailure> {
        match scalar {
            Scalar::Integer(n) => u8::try_from(*n).map(Percent).map_err(|_| ParseFailure::Invalid),
            Scalar::String(s) if s.trim().is_empty() => Err(ParseFailure::Empty),
            Scalar::String(s) => s
                .trim()
                .trim_end_matches('%')
                .parse()
                .map(Percent)
                .map_err(|_| ParseFailure::Invalid),
            _ => Err(ParseFailure::WrongKind),
        }
    }

    fn format(&self) -> Scalar {
        Scalar::String(format!("{}%", self.0))
    }
}

#[test]
fn test_custom_value_type() {
    let doc = Document::from_value(json!({"a": 40, "b": "75%", "c": "", "d": "lots", "e": [1]}));
    let json = accessor();
    let root = doc.root();

    assert_eq!(json.get::<Percent>(&root, "a").unwrap(), Percent(40));
    assert_eq!(json.get::<Percent>(&root, "b").unwrap(), Percent(75));
    assert_eq!(json.get_opt::<Percent>(&root, "c").unwrap(), None);

    let err = json.get::<Percent>(&root, "d").unwrap_err();
    assert_eq!(err.fault().unwrap().expected(), "Percent");
    assert_eq!(err.fault_kind(), Some(FaultKind::UnparsableValue));
    let err = json.get::<Percent>(&root, "e").unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::WrongNodeType));

    json.set(&root, "a", &Percent(5)).unwrap();
    assert_eq!(doc.to_value()["a"], "5%");
}

// ===== DATE-TIMES =====

#[test]
fn test_date_time_offsets_are_kept() {
    let doc = Document::from_value(json!({"when": "2022-01-01T10:00:00+02:00"}));
    let json = accessor();
    let root = doc.root();

    let local: DateTime<FixedOffset> = json.get(&root, "when").unwrap();
    assert_eq!(local.offset().local_minus_utc(), 7200);
    let utc: DateTime<Utc> = json.get(&root, "when").unwrap();
    assert_eq!(utc, Utc.with_ymd_and_hms(2022, 1, 1, 8, 0, 0).unwrap());

    json.set(&root, "when", &local).unwrap();
    assert_eq!(doc.to_value()["when"], "2022-01-01T10:00:00+02:00");
}

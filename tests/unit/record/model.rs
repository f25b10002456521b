use super::*;
use serde_json::json;

#[test]
fn parses_canonical_field_names() {
    let rec: CraterRecord = serde_json::from_value(json!({
        "id": "07-000012",
        "morphologyCode": "CpxCMa",
        "layerCount": 2,
        "ejectaMorphCodes": ["BL_S", null, "X"],
        "rimDegradation": 3,
        "ejectaDegradation": 1,
        "hasRayFeature": true
    }))
    .unwrap();
    assert_eq!(rec.id, "07-000012");
    assert_eq!(rec.morphology_code, "CpxCMa");
    assert_eq!(rec.layer_count, 2);
    assert_eq!(rec.ejecta_code(0), Some("BL_S"));
    assert_eq!(rec.ejecta_code(1), None);
    assert_eq!(rec.ejecta_code(2), Some("X"));
    assert_eq!(rec.rim_degradation, Some(Ordinal(3.0)));
    assert_eq!(rec.floor_degradation, None);
    assert!(rec.has_ray_feature);
}

#[test]
fn parses_legacy_provider_shape() {
    let rec: CraterRecord = serde_json::from_value(json!({
        "id": 42,
        "internalMorph": ["PkRg"],
        "layerNumber": "3",
        "ejcSvg": ["SLE", ""],
        "rimDegradation": "2",
        "ejectaDegradation": "",
        "floorDegradation": "n/a",
        "hasRd": "1"
    }))
    .unwrap();
    assert_eq!(rec.id, "42");
    assert_eq!(rec.morphology_code, "PkRg");
    assert_eq!(rec.layer_count, 3);
    assert_eq!(rec.ejecta_code(0), Some("SLE"));
    assert_eq!(rec.ejecta_code(1), None);
    assert_eq!(rec.rim_degradation, Some(Ordinal(2.0)));
    assert_eq!(rec.ejecta_degradation, None);
    assert!(rec.floor_degradation.unwrap().0.is_nan());
    assert!(rec.has_ray_feature);
}

#[test]
fn empty_object_is_a_sparse_record() {
    let rec: CraterRecord = serde_json::from_value(json!({})).unwrap();
    assert_eq!(rec, CraterRecord::default());
    assert_eq!(rec.morphology_code, "");
    assert_eq!(rec.layer_count, 0);
}

#[test]
fn ordinal_levels() {
    assert_eq!(Ordinal(1.0).level(), Some(DegradationLevel::Fresh));
    assert_eq!(Ordinal(4.0).level(), Some(DegradationLevel::Severe));
    assert_eq!(Ordinal(0.0).level(), None);
    assert_eq!(Ordinal(5.0).level(), None);
    assert_eq!(Ordinal(2.5).level(), None);
    assert_eq!(Ordinal(f64::NAN).level(), None);
    assert_eq!(Ordinal(f64::INFINITY).level(), None);
}

#[test]
fn render_key_tracks_planning_fields() {
    let a = CraterRecord {
        rim_degradation: Some(Ordinal::from(2)),
        ..CraterRecord::new("a")
    };
    let same = a.clone();
    assert_eq!(a.render_key(), same.render_key());

    let degraded = CraterRecord {
        rim_degradation: Some(Ordinal::from(3)),
        ..a.clone()
    };
    assert_ne!(a.render_key(), degraded.render_key());

    let renamed = CraterRecord {
        id: "b".to_string(),
        ..a.clone()
    };
    assert_ne!(a.render_key(), renamed.render_key());

    let ray_only = CraterRecord {
        has_ray_feature: true,
        ..a.clone()
    };
    assert_eq!(a.render_key(), ray_only.render_key());
}

#[test]
fn leading_int_parsing_matches_lenient_source_data() {
    assert_eq!(parse_leading_int("2"), Some(2));
    assert_eq!(parse_leading_int(" 3 layers"), Some(3));
    assert_eq!(parse_leading_int("-1"), Some(-1));
    assert_eq!(parse_leading_int("abc"), None);
}

#[test]
fn morphology_code_is_kept_verbatim() {
    let rec: CraterRecord = serde_json::from_value(json!({ "morphologyCode": " PkRg " })).unwrap();
    assert_eq!(rec.morphology_code, " PkRg ");
    let rec: CraterRecord = serde_json::from_value(json!({ "internalMorph": [null, " "] })).unwrap();
    assert_eq!(rec.morphology_code, " ");
}

use std::collections::HashSet;

use super::*;

#[test]
fn every_level_maps_to_a_distinct_color() {
    let colors: HashSet<_> = (1..=4)
        .map(|v| degradation_color(Some(Ordinal::from(v))))
        .collect();
    assert_eq!(colors.len(), 4);
    assert!(!colors.contains(&NEUTRAL_GRAY));
}

#[test]
fn palette_values_are_fixed() {
    assert_eq!(
        degradation_color(Some(Ordinal::from(1))).to_string(),
        "#00BFFF"
    );
    assert_eq!(
        degradation_color(Some(Ordinal::from(2))).to_string(),
        "#FFF598"
    );
    assert_eq!(
        degradation_color(Some(Ordinal::from(3))).to_string(),
        "#BE501E"
    );
    assert_eq!(
        degradation_color(Some(Ordinal::from(4))).to_string(),
        "#E59898"
    );
}

#[test]
fn everything_else_falls_back_to_gray() {
    for bad in [
        None,
        Some(Ordinal(0.0)),
        Some(Ordinal(5.0)),
        Some(Ordinal(-1.0)),
        Some(Ordinal(1.5)),
        Some(Ordinal(f64::NAN)),
        Some(Ordinal(f64::NEG_INFINITY)),
    ] {
        assert_eq!(degradation_color(bad), NEUTRAL_GRAY, "{bad:?}");
    }
}

#[test]
fn level_ordinals_round_trip() {
    for level in DegradationLevel::ALL {
        let ordinal = Ordinal::from(i64::from(level.ordinal()));
        assert_eq!(ordinal.level(), Some(level));
        assert_eq!(degradation_color(Some(ordinal)), level_color(level));
    }
}

use super::*;

fn slots(plan: &LayerPlan) -> Vec<LayerSlot> {
    plan.layers.iter().map(|l| l.slot).collect()
}

fn with_ejecta(layer_count: i64, codes: &[Option<&str>]) -> CraterRecord {
    CraterRecord {
        layer_count,
        ejecta_morph_codes: codes.iter().map(|c| c.map(str::to_owned)).collect(),
        ejecta_degradation: Some(Ordinal::from(2)),
        rim_degradation: Some(Ordinal::from(1)),
        floor_degradation: Some(Ordinal::from(1)),
        ..CraterRecord::new("c-1")
    }
}

#[test]
fn unclassified_record_gets_base_rim_and_ground_only() {
    let record = CraterRecord::new("a");
    let plan = plan_layers(&record, PlanOptions::default());
    assert_eq!(
        slots(&plan),
        vec![LayerSlot::FloorOutline, LayerSlot::Rim, LayerSlot::GroundPlane]
    );

    let ground = plan.layer(LayerSlot::GroundPlane).unwrap();
    assert_eq!(ground.fill_color, GROUND_NEUTRAL_LIGHT);
    assert!(!ground.wave_enabled);

    let base = plan.layer(LayerSlot::FloorOutline).unwrap();
    assert_eq!(base.fill_color, NEUTRAL_GRAY);
    assert_eq!(base.asset_key, AssetKey::new(SilhouetteKind::Floor, "Smp"));
    assert!(!base.wave_enabled);

    let dark = plan_layers(
        &record,
        PlanOptions {
            is_dark_mode: true,
            ..PlanOptions::default()
        },
    );
    assert_eq!(
        dark.layer(LayerSlot::GroundPlane).unwrap().fill_color,
        GROUND_NEUTRAL_DARK
    );
}

#[test]
fn scenario_b_colors_base_by_rim_and_keeps_interior_code() {
    let record = CraterRecord {
        layer_count: 2,
        ejecta_morph_codes: vec![Some("BL_S".into()), Some("X".into())],
        morphology_code: "CpxCMa".into(),
        rim_degradation: Some(Ordinal::from(3)),
        ..CraterRecord::new("b")
    };
    let plan = plan_layers(&record, PlanOptions::default());

    let base = plan.layer(LayerSlot::FloorOutline).unwrap();
    assert_eq!(base.fill_color, Rgba8::opaque_hex(0xBE501E));
    assert!(base.wave_enabled);
    assert_eq!(plan.ejecta_ring_count(), 2);
    assert_eq!(
        plan.layer(LayerSlot::InnerRing).unwrap().asset_key,
        AssetKey::new(SilhouetteKind::Ejecta, "BL_S")
    );
    assert_eq!(
        plan.layer(LayerSlot::MiddleRing).unwrap().asset_key,
        AssetKey::new(SilhouetteKind::Ejecta, "X")
    );

    let interior = plan.layer(LayerSlot::InteriorStructure).unwrap();
    assert_eq!(interior.asset_key.name, "CpxCMa");
    assert_eq!(interior.anim_speed, 1.0);

    let ground = plan.layer(LayerSlot::GroundPlane).unwrap();
    assert_eq!(ground.fill_color, GROUND_ACCENT_LIGHT);
}

#[test]
fn scenario_c_resolves_alias_to_canonical_asset() {
    let record = CraterRecord {
        morphology_code: "PkRg".into(),
        ..CraterRecord::new("c")
    };
    let plan = plan_layers(&record, PlanOptions::default());
    let interior = plan.layer(LayerSlot::InteriorStructure).unwrap();
    assert_eq!(
        interior.asset_key,
        AssetKey::new(SilhouetteKind::Interior, "CpxPkRg")
    );
}

#[test]
fn aliases_plan_identically_to_canonical_codes() {
    for (alias, canonical) in [
        ("CPk", "CpxCpk"),
        ("SuPt", "CpxSuPt"),
        ("Unc", "CpxUnc"),
        ("CMa", "CpxCMa"),
        ("SmpCPt", "CpxCpt"),
    ] {
        let a = plan_layers(
            &CraterRecord {
                morphology_code: alias.into(),
                ..CraterRecord::new("x")
            },
            PlanOptions::default(),
        );
        let c = plan_layers(
            &CraterRecord {
                morphology_code: canonical.into(),
                ..CraterRecord::new("x")
            },
            PlanOptions::default(),
        );
        assert_eq!(a.layers, c.layers, "{alias}");
    }
}

#[test]
fn excluded_morphologies_have_no_interior_layer() {
    for code in ["CpxFF", "Bsn", "Smp"] {
        let plan = plan_layers(
            &CraterRecord {
                morphology_code: code.into(),
                ..CraterRecord::new("x")
            },
            PlanOptions::default(),
        );
        assert!(plan.layer(LayerSlot::InteriorStructure).is_none(), "{code}");
    }
}

#[test]
fn flat_floor_uses_its_own_base_outline() {
    let plan = plan_layers(
        &CraterRecord {
            morphology_code: "CpxFF".into(),
            ..CraterRecord::new("x")
        },
        PlanOptions::default(),
    );
    assert_eq!(
        plan.layer(LayerSlot::FloorOutline).unwrap().asset_key,
        AssetKey::new(SilhouetteKind::Floor, "CpxFF")
    );
}

#[test]
fn single_layer_ejecta_lands_in_middle_ring() {
    let plan = plan_layers(&with_ejecta(1, &[Some("A")]), PlanOptions::default());
    assert_eq!(plan.ejecta_ring_count(), 1);
    let ring = plan.layer(LayerSlot::MiddleRing).unwrap();
    assert_eq!(ring.anim_speed, 0.08);
    assert_eq!(ring.fill_color, Rgba8::opaque_hex(0xFFF598));
}

#[test]
fn three_layers_fill_every_ring() {
    let plan = plan_layers(
        &with_ejecta(3, &[Some("A"), Some("B"), Some("C")]),
        PlanOptions::default(),
    );
    assert_eq!(
        slots(&plan),
        vec![
            LayerSlot::FloorOutline,
            LayerSlot::OuterRing,
            LayerSlot::MiddleRing,
            LayerSlot::InnerRing,
            LayerSlot::Rim,
            LayerSlot::GroundPlane,
        ]
    );
    assert_eq!(plan.layer(LayerSlot::OuterRing).unwrap().asset_key.name, "C");
}

#[test]
fn holes_are_skipped_not_placeholdered() {
    let plan = plan_layers(
        &with_ejecta(3, &[Some("A"), None, Some("")]),
        PlanOptions::default(),
    );
    assert_eq!(plan.ejecta_ring_count(), 1);
    assert!(plan.layer(LayerSlot::InnerRing).is_some());

    let short = plan_layers(&with_ejecta(3, &[Some("A")]), PlanOptions::default());
    assert_eq!(short.ejecta_ring_count(), 1);
}

#[test]
fn layer_count_bounds_considered_entries() {
    let codes = [Some("A"), Some("B"), Some("C")];
    assert_eq!(
        plan_layers(&with_ejecta(0, &codes), PlanOptions::default()).ejecta_ring_count(),
        0
    );
    assert_eq!(
        plan_layers(&with_ejecta(2, &codes), PlanOptions::default()).ejecta_ring_count(),
        2
    );
    assert_eq!(
        plan_layers(&with_ejecta(9, &codes), PlanOptions::default()).ejecta_ring_count(),
        3
    );
    assert_eq!(
        plan_layers(&with_ejecta(-4, &codes), PlanOptions::default()).ejecta_ring_count(),
        0
    );
}

#[test]
fn layers_are_sorted_bottom_first_with_fixed_speeds() {
    let record = CraterRecord {
        morphology_code: "CpxCpk".into(),
        ..with_ejecta(3, &[Some("A"), Some("B"), Some("C")])
    };
    let plan = plan_layers(&record, PlanOptions::default());
    assert_eq!(plan.layers.len(), 7);
    for (layer, slot) in plan.layers.iter().zip(LayerSlot::ALL) {
        assert_eq!(layer.slot, slot);
        assert_eq!(layer.z_order, slot.z_order());
        assert_eq!(layer.anim_speed, slot.anim_speed());
        assert!(layer.force_color_override);
    }
}

#[test]
fn disable_wave_effect_turns_every_overlay_off() {
    let record = CraterRecord {
        morphology_code: "CpxCpk".into(),
        ..with_ejecta(2, &[Some("A"), Some("B")])
    };
    let plan = plan_layers(
        &record,
        PlanOptions {
            disable_wave_effect: true,
            ..PlanOptions::default()
        },
    );
    assert!(plan.layers.iter().all(|l| !l.wave_enabled));
}

#[test]
fn recoveries_are_reported_once_per_field() {
    let record = CraterRecord {
        morphology_code: "Weird".into(),
        rim_degradation: Some(Ordinal(7.0)),
        ..CraterRecord::new("x")
    };
    let plan = plan_layers(&record, PlanOptions::default());

    assert_eq!(
        plan.layer(LayerSlot::InteriorStructure).unwrap().asset_key.name,
        "Weird"
    );
    assert!(plan.recovered.contains(&Recovery::UnmappedMorphologyCode {
        code: "Weird".into()
    }));
    let rim_reports = plan
        .recovered
        .iter()
        .filter(|r| {
            matches!(
                r,
                Recovery::InvalidDegradationOrdinal {
                    field: DegradationField::Rim,
                    ..
                }
            )
        })
        .count();
    assert_eq!(rim_reports, 1);
    assert!(plan.recovered.contains(&Recovery::InvalidDegradationOrdinal {
        field: DegradationField::Floor,
        value: None,
    }));
}

#[test]
fn fully_specified_record_recovers_nothing() {
    let record = CraterRecord {
        morphology_code: "CpxCpt".into(),
        ..with_ejecta(1, &[Some("A")])
    };
    assert!(plan_layers(&record, PlanOptions::default()).recovered.is_empty());
}

#[test]
fn whitespace_code_counts_as_classified_unknown() {
    let record = CraterRecord {
        morphology_code: " PkRg ".into(),
        rim_degradation: Some(Ordinal::from(1)),
        ..CraterRecord::new("w")
    };
    let plan = plan_layers(&record, PlanOptions::default());

    let base = plan.layer(LayerSlot::FloorOutline).unwrap();
    assert!(base.wave_enabled);
    assert_ne!(base.fill_color, NEUTRAL_GRAY);
    assert_eq!(
        plan.layer(LayerSlot::InteriorStructure).unwrap().asset_key,
        AssetKey::new(SilhouetteKind::Interior, " PkRg ")
    );
    assert!(plan.recovered.contains(&Recovery::UnmappedMorphologyCode {
        code: " PkRg ".into()
    }));
}

use super::*;

fn lib() -> BuiltinSilhouettes {
    BuiltinSilhouettes::new().unwrap()
}

#[test]
fn fixed_keys_resolve() {
    let lib = lib();
    for key in [
        AssetKey::new(SilhouetteKind::Floor, "Smp"),
        AssetKey::new(SilhouetteKind::Floor, "CpxFF"),
        AssetKey::new(SilhouetteKind::Rim, "rim"),
        AssetKey::new(SilhouetteKind::Ground, "ground"),
        AssetKey::new(SilhouetteKind::Interior, "CpxPkRg"),
        AssetKey::unknown(),
    ] {
        let s = lib.resolve(&key).unwrap_or_else(|| panic!("{key}"));
        assert_eq!(s.size(), (200.0, 200.0));
    }
}

#[test]
fn any_ejecta_code_resolves() {
    let lib = lib();
    assert!(
        lib.resolve(&AssetKey::new(SilhouetteKind::Ejecta, "BL_S"))
            .is_some()
    );
    assert!(
        lib.resolve(&AssetKey::new(SilhouetteKind::Ejecta, "X"))
            .is_some()
    );
    assert!(
        lib.resolve(&AssetKey::new(SilhouetteKind::Ejecta, ""))
            .is_none()
    );
}

#[test]
fn unknown_interior_codes_stay_unresolved() {
    let lib = lib();
    assert!(
        lib.resolve(&AssetKey::new(SilhouetteKind::Interior, "Zzz"))
            .is_none()
    );
    assert!(
        lib.resolve(&AssetKey::new(SilhouetteKind::Interior, "PkRg"))
            .is_none()
    );
}

#[test]
fn documents_use_the_crater_viewbox() {
    let svg = svg_document(&circle(10.0));
    assert!(svg.contains(r#"viewBox="-100 -100 200 200""#));
    assert!(svg.contains("fill-rule=\"evenodd\""));
}

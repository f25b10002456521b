use super::*;

const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="20"/></svg>"#;

struct OneKey(AssetKey, Silhouette);

impl SilhouetteSource for OneKey {
    fn resolve(&self, key: &AssetKey) -> Option<Silhouette> {
        (key == &self.0).then(|| self.1.clone())
    }
}

#[test]
fn asset_key_display_is_kind_slash_name() {
    assert_eq!(
        AssetKey::new(SilhouetteKind::Interior, "CpxPkRg").to_string(),
        "interior/CpxPkRg"
    );
    assert_eq!(AssetKey::unknown().to_string(), "fallback/unknown");
}

#[test]
fn parses_svg_and_reports_size() {
    let s = Silhouette::from_svg_str(SQUARE).unwrap();
    assert_eq!(s.size(), (10.0, 20.0));
}

#[test]
fn invalid_svg_is_an_error() {
    assert!(Silhouette::from_svg_str("<not-svg").is_err());
}

#[test]
fn overlays_take_precedence_over_builtins() {
    let key = AssetKey::new(SilhouetteKind::Rim, "rim");
    let custom = Silhouette::from_svg_str(SQUARE).unwrap();
    let lib = SilhouetteLibrary::builtin()
        .unwrap()
        .with_overlay(OneKey(key.clone(), custom));
    assert_eq!(lib.resolve(&key).unwrap().size(), (10.0, 20.0));

    let other = AssetKey::new(SilhouetteKind::Ground, "ground");
    assert_eq!(lib.resolve(&other).unwrap().size(), (200.0, 200.0));
}

#[test]
fn unresolved_keys_fall_back_with_a_recovery() {
    let lib = SilhouetteLibrary::builtin().unwrap();
    let key = AssetKey::new(SilhouetteKind::Interior, "Nope");
    let (s, recovery) = lib.resolve_or_fallback(&key);
    assert_eq!(s.size(), (200.0, 200.0));
    assert_eq!(
        recovery,
        Some(Recovery::MissingAssetReference {
            key: "interior/Nope".to_string(),
            fallback: "fallback/unknown".to_string(),
        })
    );

    let (_, none) = lib.resolve_or_fallback(&AssetKey::new(SilhouetteKind::Rim, "rim"));
    assert_eq!(none, None);
}

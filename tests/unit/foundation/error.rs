use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GlyphError::asset("x").to_string().contains("asset error:"));
    assert!(GlyphError::render("x").to_string().contains("render error:"));
    assert!(
        GlyphError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: GlyphError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, GlyphError::Serde(_)));
}

#[test]
fn recovery_messages_name_the_fallback() {
    let r = Recovery::MissingAssetReference {
        key: "interior/Zz".to_string(),
        fallback: "fallback/unknown".to_string(),
    };
    assert!(r.to_string().contains("fallback/unknown"));

    let r = Recovery::InvalidDegradationOrdinal {
        field: DegradationField::Ejecta,
        value: None,
    };
    assert!(r.to_string().contains("ejecta"));
}

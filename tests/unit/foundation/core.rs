use super::*;

#[test]
fn opaque_hex_splits_channels() {
    let c = Rgba8::opaque_hex(0x00BFFF);
    assert_eq!(c.to_array(), [0x00, 0xBF, 0xFF, 255]);
    assert_eq!(c.to_string(), "#00BFFF");
}

#[test]
fn premul_of_opaque_is_identity() {
    let c = Rgba8::opaque_hex(0xBE501E);
    assert_eq!(c.to_premul().to_array(), c.to_array());
}

#[test]
fn premul_half_alpha_halves_channels() {
    let p = Rgba8Premul::from_straight_rgba(200, 100, 0, 128);
    assert_eq!(p.to_array(), [100, 50, 0, 128]);
}

#[test]
fn frame_pixel_bounds_and_blank() {
    let f = Frame::transparent(3, 2);
    assert_eq!(f.data.len(), 3 * 2 * 4);
    assert!(f.is_blank());
    assert_eq!(f.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(3, 0), None);

    let s = Frame::solid(2, 2, Rgba8Premul::from_straight_rgba(1, 2, 3, 255));
    assert_eq!(s.pixel(1, 1), Some([1, 2, 3, 255]));
    assert!(!s.is_blank());
}

#[test]
fn hex_parsing_accepts_both_lengths() {
    assert_eq!("#1a1a1a".parse::<Rgba8>().unwrap(), Rgba8::opaque_hex(0x1a1a1a));
    let c: Rgba8 = "FF000080".parse().unwrap();
    assert_eq!(c.to_array(), [255, 0, 0, 0x80]);
    assert!("#12345".parse::<Rgba8>().is_err());
    assert!("#zz0000".parse::<Rgba8>().is_err());
}

#[test]
fn color_serde_reprs() {
    let hex: Rgba8 = serde_json::from_str(r##""#F57435""##).unwrap();
    let obj: Rgba8 = serde_json::from_str(r#"{"r":245,"g":116,"b":53}"#).unwrap();
    let arr: Rgba8 = serde_json::from_str("[245,116,53,255]").unwrap();
    assert_eq!(hex, obj);
    assert_eq!(obj, arr);
    assert_eq!(serde_json::to_string(&hex).unwrap(), r##""#F57435""##);
    assert!(serde_json::from_str::<Rgba8>("[1,2]").is_err());
}

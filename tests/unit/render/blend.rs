use super::*;

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([0, 0, 255, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn over_zero_opacity_keeps_dst() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
}

#[test]
fn multiply_darkens() {
    let mut dst = vec![128, 128, 128, 255];
    blend_in_place(&mut dst, &[128, 255, 0, 255], 1.0, BlendMode::Multiply).unwrap();
    assert_eq!(dst, vec![64, 128, 0, 255]);
}

#[test]
fn difference_of_equal_colors_is_black() {
    let mut dst = vec![200, 40, 90, 255];
    blend_in_place(&mut dst, &[200, 40, 90, 255], 1.0, BlendMode::Difference).unwrap();
    assert_eq!(dst, vec![0, 0, 0, 255]);

    let mut dst = vec![255, 255, 255, 255];
    blend_in_place(&mut dst, &[255, 0, 0, 255], 1.0, BlendMode::Difference).unwrap();
    assert_eq!(dst, vec![0, 255, 255, 255]);
}

#[test]
fn blend_onto_transparent_dst_is_plain_source() {
    for mode in [BlendMode::Multiply, BlendMode::Difference] {
        let mut dst = vec![0, 0, 0, 0];
        blend_in_place(&mut dst, &[100, 50, 25, 255], 1.0, mode).unwrap();
        assert_eq!(dst, vec![100, 50, 25, 255], "{mode:?}");
    }
}

#[test]
fn normal_matches_over() {
    let mut dst = vec![10, 20, 30, 255];
    blend_in_place(&mut dst, &[64, 0, 0, 128], 0.5, BlendMode::Normal).unwrap();
    assert_eq!(dst, over([10, 20, 30, 255], [64, 0, 0, 128], 0.5).to_vec());
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    let err = blend_in_place(&mut dst, &[0u8; 4], 1.0, BlendMode::Normal).unwrap_err();
    assert!(matches!(err, GlyphError::Render(_)));
}

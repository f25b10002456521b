use image::{ImageBuffer, Rgba, imageops::FilterType};

use crate::{
    foundation::{
        core::Frame,
        error::{GlyphError, GlyphResult},
        math::mul_div255_u8,
    },
    noise::lattice::FIELD_SIZE,
    plan::planner::{LayerDescriptor, LayerSlot},
    render::{
        blend::{BlendMode, over},
        mask::SilhouetteMask,
    },
};

/// The noise texture drawn on top of a layer's fill.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveOverlay {
    /// Premultiplied, mask-clipped, upscaled noise frame.
    pub frame: Frame,
    /// Blend against everything beneath.
    pub blend: BlendMode,
    /// Overlay-only opacity, driven externally for fades.
    pub opacity: f32,
}

/// What a layer draws: a silhouette fill and an optional wave overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerDrawable {
    /// Premultiplied silhouette fill.
    pub fill: Frame,
    /// Noise overlay, present for wave-enabled layers with a drawn frame.
    pub wave: Option<WaveOverlay>,
}

/// One composited layer, ready to stack.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositedLayer {
    /// Composition slot.
    pub slot: LayerSlot,
    /// Stacking position.
    pub z_order: i32,
    /// Pixels.
    pub drawable: LayerDrawable,
    /// Whole-layer opacity.
    pub opacity: f32,
}

/// Blend mode for a slot's wave overlay. Only the outer ejecta ring multiplies.
pub fn blend_for_slot(slot: LayerSlot) -> BlendMode {
    match slot {
        LayerSlot::OuterRing => BlendMode::Multiply,
        _ => BlendMode::Difference,
    }
}

fn fill_frame(descriptor: &LayerDescriptor, mask: &SilhouetteMask) -> Frame {
    let size = mask.size();
    if !descriptor.force_color_override {
        return Frame {
            width: size,
            height: size,
            data: mask.paint().to_vec(),
            premultiplied: true,
        };
    }

    let color = descriptor.fill_color.to_premul().to_array();
    let mut data = Vec::with_capacity(mask.paint().len());
    for (&cov, stroke) in mask.fill_coverage().iter().zip(mask.strokes().chunks_exact(4)) {
        let cov = u16::from(cov);
        let base = color.map(|c| mul_div255_u8(u16::from(c), cov));
        let stroke = [stroke[0], stroke[1], stroke[2], stroke[3]];
        data.extend(over(base, stroke, 1.0));
    }
    Frame {
        width: size,
        height: size,
        data,
        premultiplied: true,
    }
}

/// Upscale a straight-alpha noise raster to the mask size, premultiply, and clip by coverage.
pub(crate) fn wave_frame(raster: &[u8], mask: &SilhouetteMask) -> GlyphResult<Frame> {
    let edge = FIELD_SIZE as u32;
    let src: ImageBuffer<Rgba<u8>, &[u8]> = ImageBuffer::from_raw(edge, edge, raster)
        .ok_or_else(|| GlyphError::render("noise raster has the wrong length"))?;

    let size = mask.size();
    let scaled = image::imageops::resize(&src, size, size, FilterType::Triangle);

    let mut data = scaled.into_raw();
    for (px, &cov) in data.chunks_exact_mut(4).zip(mask.coverage()) {
        let a = mul_div255_u8(u16::from(px[3]), u16::from(cov));
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), u16::from(a));
        }
        px[3] = a;
    }

    Ok(Frame {
        width: size,
        height: size,
        data,
        premultiplied: true,
    })
}

/// Combine one layer's noise raster, prepared mask and descriptor.
///
/// `raster` is the layer's last straight-alpha `128×128` noise frame; it is ignored when the
/// descriptor disables the wave effect, and a missing raster simply yields no overlay.
pub fn composite_layer(
    descriptor: &LayerDescriptor,
    mask: &SilhouetteMask,
    raster: Option<&[u8]>,
    overlay_opacity: f32,
) -> GlyphResult<CompositedLayer> {
    let fill = fill_frame(descriptor, mask);
    let wave = match raster {
        Some(raster) if descriptor.wave_enabled => Some(WaveOverlay {
            frame: wave_frame(raster, mask)?,
            blend: blend_for_slot(descriptor.slot),
            opacity: overlay_opacity.clamp(0.0, 1.0),
        }),
        _ => None,
    };

    Ok(CompositedLayer {
        slot: descriptor.slot,
        z_order: descriptor.z_order,
        drawable: LayerDrawable { fill, wave },
        opacity: 1.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

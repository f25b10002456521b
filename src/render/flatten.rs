use crate::{
    foundation::{
        core::{Frame, Rgba8},
        error::{GlyphError, GlyphResult},
    },
    render::{
        blend::{BlendMode, blend_in_place},
        compositor::CompositedLayer,
    },
};

fn check_size(frame: &Frame, size: u32, what: &str) -> GlyphResult<()> {
    if frame.width != size || frame.height != size || !frame.premultiplied {
        return Err(GlyphError::render(format!(
            "{what} is {}x{} (premultiplied={}), expected premultiplied {size}x{size}",
            frame.width, frame.height, frame.premultiplied
        )));
    }
    Ok(())
}

/// Stack composited layers bottom to top onto a solid background.
///
/// Each layer draws its fill with source-over at the layer opacity, then its wave overlay with
/// the overlay's blend mode at `overlay opacity × layer opacity`. Layers are drawn in ascending
/// z-order regardless of input order.
#[tracing::instrument(skip(layers), fields(count = layers.len()))]
pub fn flatten_layers(
    layers: &[CompositedLayer],
    size: u32,
    background: Rgba8,
) -> GlyphResult<Frame> {
    let mut out = Frame::solid(size, size, background.to_premul());

    let mut ordered: Vec<&CompositedLayer> = layers.iter().collect();
    ordered.sort_by_key(|l| l.z_order);

    for layer in ordered {
        let fill = &layer.drawable.fill;
        check_size(fill, size, "layer fill")?;
        blend_in_place(&mut out.data, &fill.data, layer.opacity, BlendMode::Normal)?;

        if let Some(wave) = &layer.drawable.wave {
            check_size(&wave.frame, size, "wave overlay")?;
            blend_in_place(
                &mut out.data,
                &wave.frame.data,
                wave.opacity * layer.opacity,
                wave.blend,
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/flatten.rs"]
mod tests;

use resvg::tiny_skia::{FillRule, Paint, Pixmap, Transform};

use crate::{
    assets::silhouette::Silhouette,
    foundation::error::{GlyphError, GlyphResult},
};

/// A silhouette rasterized once for a given output size.
///
/// `paint` keeps the silhouette's own premultiplied colors; `coverage` is its alpha channel and
/// clips both the flat fill and the wave overlay. Color overrides repaint only the fill region
/// (`fill_coverage`) and keep the outline strokes (`strokes`) on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilhouetteMask {
    size: u32,
    paint: Vec<u8>,
    coverage: Vec<u8>,
    fill_coverage: Vec<u8>,
    strokes: Vec<u8>,
}

fn alloc_pixmap(size: u32) -> GlyphResult<Pixmap> {
    Pixmap::new(size, size).ok_or_else(|| GlyphError::render("failed to allocate mask pixmap"))
}

fn solid_paint(r: u8, g: u8, b: u8, a: u8) -> Paint<'static> {
    let mut out = Paint::default();
    out.set_color_rgba8(r, g, b, a);
    out.anti_alias = true;
    out
}

/// Non-solid stroke paints (gradients, patterns) are drawn black.
fn stroke_paint(stroke: &usvg::Stroke) -> Paint<'static> {
    let a = (stroke.opacity().get().clamp(0.0, 1.0) * 255.0).round() as u8;
    match stroke.paint() {
        usvg::Paint::Color(c) => solid_paint(c.red, c.green, c.blue, a),
        _ => solid_paint(0, 0, 0, a),
    }
}

/// Split every visible path into a solid fill coverage pass and a colored stroke pass.
fn draw_outline(group: &usvg::Group, xform: Transform, fill: &mut Pixmap, strokes: &mut Pixmap) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => draw_outline(g, xform, fill, strokes),
            usvg::Node::Path(p) if p.is_visible() => {
                let ts = xform.pre_concat(p.abs_transform());
                if let Some(f) = p.fill() {
                    let rule = match f.rule() {
                        usvg::FillRule::NonZero => FillRule::Winding,
                        usvg::FillRule::EvenOdd => FillRule::EvenOdd,
                    };
                    fill.fill_path(p.data(), &solid_paint(0, 0, 0, 255), rule, ts, None);
                }
                if let Some(s) = p.stroke() {
                    strokes.stroke_path(p.data(), &stroke_paint(s), &s.to_tiny_skia(), ts, None);
                }
            }
            _ => {}
        }
    }
}

impl SilhouetteMask {
    /// Rasterize `silhouette` into a `size×size` square, scaled uniformly and centered
    /// ("contain" fit).
    #[tracing::instrument(skip(silhouette))]
    pub fn rasterize(silhouette: &Silhouette, size: u32) -> GlyphResult<Self> {
        if size == 0 {
            return Err(GlyphError::validation("mask size must be non-zero"));
        }
        let (w, h) = silhouette.size();
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Err(GlyphError::asset("silhouette has invalid width/height"));
        }

        let mut pixmap = alloc_pixmap(size)?;

        let edge = size as f32;
        let scale = (edge / w).min(edge / h);
        let tx = (edge - w * scale) / 2.0;
        let ty = (edge - h * scale) / 2.0;
        let xform = Transform::from_row(scale, 0.0, 0.0, scale, tx, ty);

        resvg::render(silhouette.tree(), xform, &mut pixmap.as_mut());

        let mut fill = alloc_pixmap(size)?;
        let mut strokes = alloc_pixmap(size)?;
        draw_outline(silhouette.tree().root(), xform, &mut fill, &mut strokes);

        let paint = pixmap.data().to_vec();
        let coverage = paint.chunks_exact(4).map(|px| px[3]).collect();
        let fill_coverage = fill.data().chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self {
            size,
            paint,
            coverage,
            fill_coverage,
            strokes: strokes.take(),
        })
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Premultiplied RGBA8 rendering of the silhouette.
    pub fn paint(&self) -> &[u8] {
        &self.paint
    }

    /// One alpha byte per pixel.
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Alpha of the fill regions alone, one byte per pixel.
    pub fn fill_coverage(&self) -> &[u8] {
        &self.fill_coverage
    }

    /// Premultiplied RGBA8 rendering of the outline strokes alone.
    pub fn strokes(&self) -> &[u8] {
        &self.strokes
    }

    /// Fraction of pixels with any coverage.
    pub fn covered_fraction(&self) -> f64 {
        if self.coverage.is_empty() {
            return 0.0;
        }
        let covered = self.coverage.iter().filter(|&&a| a > 0).count();
        covered as f64 / self.coverage.len() as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;

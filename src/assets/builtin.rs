use std::{collections::HashMap, f64::consts::TAU};

use kurbo::{BezPath, Circle, Ellipse, Shape};

use crate::{
    assets::silhouette::{AssetKey, Silhouette, SilhouetteKind, SilhouetteSource},
    foundation::{error::GlyphResult, math::Fnv1a64},
};

const VIEW_EXTENT: f64 = 200.0;
const TOLERANCE: f64 = 0.1;

/// Procedural stand-ins for the crater silhouette set.
///
/// Every fixed key is built from `kurbo` shapes at construction. Ejecta outlines are generated on
/// demand for any code: a lobed ring whose lobe count is derived from the code, so different
/// codes stay visually distinct. Interior shapes exist only for the canonical morphology codes;
/// anything else is left unresolved for the compositor's fallback.
#[derive(Debug)]
pub(crate) struct BuiltinSilhouettes {
    fixed: HashMap<AssetKey, Silhouette>,
    unknown: Silhouette,
}

impl BuiltinSilhouettes {
    pub(crate) fn new() -> GlyphResult<Self> {
        let mut fixed = HashMap::new();
        let mut add = |kind: SilhouetteKind, name: &str, path: BezPath| -> GlyphResult<()> {
            fixed.insert(
                AssetKey::new(kind, name),
                Silhouette::from_svg_str(&svg_document(&path))?,
            );
            Ok(())
        };

        add(SilhouetteKind::Floor, "Smp", circle(62.0))?;
        add(SilhouetteKind::Floor, "CpxFF", polygon(16, 64.0))?;
        add(SilhouetteKind::Rim, "rim", annulus(70.0, 58.0))?;
        add(
            SilhouetteKind::Ground,
            "ground",
            Ellipse::new((0.0, 0.0), (96.0, 34.0), 0.0).to_path(TOLERANCE),
        )?;

        add(
            SilhouetteKind::Interior,
            "CpxCMa",
            Ellipse::new((0.0, 0.0), (22.0, 14.0), 0.0).to_path(TOLERANCE),
        )?;
        add(SilhouetteKind::Interior, "CpxCpk", star(5, 20.0, 9.0))?;
        add(SilhouetteKind::Interior, "CpxCpt", annulus(22.0, 10.0))?;
        add(SilhouetteKind::Interior, "CpxPkRg", annulus(34.0, 26.0))?;
        add(SilhouetteKind::Interior, "CpxSuPt", {
            let mut p = star(6, 24.0, 14.0);
            p.extend(Circle::new((0.0, 0.0), 6.0).path_elements(TOLERANCE));
            p
        })?;
        add(SilhouetteKind::Interior, "CpxUnc", polygon(4, 20.0))?;

        let unknown = Silhouette::from_svg_str(&svg_document(&question_mark()))?;
        fixed.insert(AssetKey::unknown(), unknown.clone());

        Ok(Self { fixed, unknown })
    }

    pub(crate) fn unknown(&self) -> Silhouette {
        self.unknown.clone()
    }
}

impl SilhouetteSource for BuiltinSilhouettes {
    fn resolve(&self, key: &AssetKey) -> Option<Silhouette> {
        if let Some(s) = self.fixed.get(key) {
            return Some(s.clone());
        }
        if key.kind != SilhouetteKind::Ejecta || key.name.is_empty() {
            return None;
        }
        let path = lobed_ring(&key.name);
        match Silhouette::from_svg_str(&svg_document(&path)) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::warn!(%key, error = %err, "failed to build ejecta silhouette");
                None
            }
        }
    }
}

fn svg_document(path: &BezPath) -> String {
    let half = VIEW_EXTENT / 2.0;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{e}" height="{e}" "#,
            r#"viewBox="{min} {min} {e} {e}">"#,
            r##"<path d="{d}" fill="#000000" fill-rule="evenodd" stroke="black" stroke-width="1"/>"##,
            "</svg>"
        ),
        e = VIEW_EXTENT,
        min = -half,
        d = path.to_svg(),
    )
}

fn circle(r: f64) -> BezPath {
    Circle::new((0.0, 0.0), r).to_path(TOLERANCE)
}

fn annulus(outer: f64, inner: f64) -> BezPath {
    let mut p = circle(outer);
    p.extend(Circle::new((0.0, 0.0), inner).path_elements(TOLERANCE));
    p
}

fn polygon(sides: u32, r: f64) -> BezPath {
    radial_outline(sides as usize, |_| r)
}

fn star(points: u32, outer: f64, inner: f64) -> BezPath {
    radial_outline(points as usize * 2, |i| if i % 2 == 0 { outer } else { inner })
}

fn radial_outline(n: usize, radius_at: impl Fn(usize) -> f64) -> BezPath {
    let mut p = BezPath::new();
    for i in 0..n {
        let theta = TAU * (i as f64) / (n as f64) - TAU / 4.0;
        let r = radius_at(i);
        let pt = (r * theta.cos(), r * theta.sin());
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    p.close_path();
    p
}

fn lobed_ring(code: &str) -> BezPath {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(code.as_bytes());
    let lobes = 5.0 + (h.finish() % 5) as f64;

    const STEPS: usize = 180;
    let mut p = BezPath::new();
    for i in 0..STEPS {
        let theta = TAU * (i as f64) / (STEPS as f64);
        let r = 86.0 + 8.0 * (lobes * theta).cos();
        let pt = (r * theta.cos(), r * theta.sin());
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    p.close_path();
    p.extend(Circle::new((0.0, 0.0), 72.0).path_elements(TOLERANCE));
    p
}

fn question_mark() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((-18.0, -22.0));
    p.curve_to((-18.0, -46.0), (18.0, -46.0), (18.0, -22.0));
    p.curve_to((18.0, -8.0), (5.0, -6.0), (5.0, 8.0));
    p.line_to((-5.0, 8.0));
    p.curve_to((-5.0, -12.0), (8.0, -12.0), (8.0, -22.0));
    p.curve_to((8.0, -34.0), (-8.0, -34.0), (-8.0, -22.0));
    p.close_path();
    p.extend(Circle::new((0.0, 20.0), 6.0).path_elements(TOLERANCE));
    p
}

#[cfg(test)]
#[path = "../../tests/unit/assets/builtin.rs"]
mod tests;

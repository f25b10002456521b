use crate::{
    assets::silhouette::{AssetKey, SilhouetteKind},
    foundation::{
        core::Rgba8,
        error::{DegradationField, Recovery},
    },
    plan::{
        morphology::{Morphology, resolve_morphology},
        palette::{
            GROUND_ACCENT_DARK, GROUND_ACCENT_LIGHT, GROUND_NEUTRAL_DARK, GROUND_NEUTRAL_LIGHT,
            NEUTRAL_GRAY, degradation_color,
        },
    },
    record::model::{CraterRecord, Ordinal},
};

/// Fixed composition slots, listed bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum LayerSlot {
    /// Base floor outline.
    FloorOutline,
    /// Third ejecta ring.
    OuterRing,
    /// Second ejecta ring (also the only ring of single-layer ejecta).
    MiddleRing,
    /// First ejecta ring.
    InnerRing,
    /// Crater rim.
    Rim,
    /// Ground plane.
    GroundPlane,
    /// Interior structure (peak, pit, ring...).
    InteriorStructure,
}

impl LayerSlot {
    /// All slots, bottom to top.
    pub const ALL: [Self; 7] = [
        Self::FloorOutline,
        Self::OuterRing,
        Self::MiddleRing,
        Self::InnerRing,
        Self::Rim,
        Self::GroundPlane,
        Self::InteriorStructure,
    ];

    /// Stacking position; larger draws later (on top).
    pub fn z_order(self) -> i32 {
        match self {
            Self::FloorOutline => 0,
            Self::OuterRing => 1,
            Self::MiddleRing => 2,
            Self::InnerRing => 3,
            Self::Rim => 4,
            Self::GroundPlane => 5,
            Self::InteriorStructure => 6,
        }
    }

    /// Phase advance multiplier for this slot's noise.
    pub fn anim_speed(self) -> f64 {
        match self {
            Self::FloorOutline => 0.1,
            Self::OuterRing => 0.5,
            Self::MiddleRing => 0.08,
            Self::InnerRing => 0.1,
            Self::Rim => 0.04,
            Self::GroundPlane => 0.06,
            Self::InteriorStructure => 1.0,
        }
    }

    /// True for the three ejecta ring slots.
    pub fn is_ejecta_ring(self) -> bool {
        matches!(self, Self::OuterRing | Self::MiddleRing | Self::InnerRing)
    }
}

/// Everything needed to draw one layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerDescriptor {
    /// Composition slot.
    pub slot: LayerSlot,
    /// Stacking position, see [`LayerSlot::z_order`].
    pub z_order: i32,
    /// Silhouette to fill and mask with.
    pub asset_key: AssetKey,
    /// Flat fill color.
    pub fill_color: Rgba8,
    /// Noise phase advance multiplier.
    pub anim_speed: f64,
    /// Whether the noise overlay is drawn.
    pub wave_enabled: bool,
    /// Paint the silhouette with `fill_color` instead of its own colors.
    pub force_color_override: bool,
}

impl LayerDescriptor {
    fn new(slot: LayerSlot, asset_key: AssetKey, fill_color: Rgba8, wave_enabled: bool) -> Self {
        Self {
            slot,
            z_order: slot.z_order(),
            asset_key,
            fill_color,
            anim_speed: slot.anim_speed(),
            wave_enabled,
            force_color_override: true,
        }
    }
}

/// Inputs to planning that come from the display context rather than the record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Dark backgrounds swap the ground-plane colors.
    pub is_dark_mode: bool,
    /// Suppress every noise overlay (still exports).
    pub disable_wave_effect: bool,
}

/// Planner output: descriptors bottom to top, plus the fallbacks taken to produce them.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerPlan {
    /// Descriptors ordered by ascending z-order.
    pub layers: Vec<LayerDescriptor>,
    /// Recovered sparse-input conditions.
    pub recovered: Vec<Recovery>,
}

impl LayerPlan {
    /// Descriptor for `slot`, if planned.
    pub fn layer(&self, slot: LayerSlot) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.slot == slot)
    }

    /// Number of ejecta ring layers.
    pub fn ejecta_ring_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| l.slot.is_ejecta_ring())
            .count()
    }
}

/// Ring slots for each considered ejecta index, by layer count.
fn ejecta_slots(layer_count: i64) -> &'static [(usize, LayerSlot)] {
    match layer_count.clamp(0, 3) {
        0 => &[],
        1 => &[(0, LayerSlot::MiddleRing)],
        2 => &[(0, LayerSlot::InnerRing), (1, LayerSlot::MiddleRing)],
        _ => &[
            (0, LayerSlot::InnerRing),
            (1, LayerSlot::MiddleRing),
            (2, LayerSlot::OuterRing),
        ],
    }
}

/// Palette color for an ordinal, noting the fallback once per field.
fn ordinal_color(
    field: DegradationField,
    ordinal: Option<Ordinal>,
    recovered: &mut Vec<Recovery>,
) -> Rgba8 {
    let reported = recovered.iter().any(
        |r| matches!(r, Recovery::InvalidDegradationOrdinal { field: f, .. } if *f == field),
    );
    // The rim ordinal feeds two layers.
    if !reported && ordinal.and_then(Ordinal::level).is_none() {
        recovered.push(Recovery::InvalidDegradationOrdinal {
            field,
            value: ordinal.map(|o| o.0),
        });
    }
    degradation_color(ordinal)
}

/// Turn a crater record into its ordered layer stack.
///
/// Never fails: floor outline, rim and ground plane are always present; ejecta rings appear only
/// for present codes within `layer_count`; the interior layer appears for classified,
/// non-excluded morphologies.
#[tracing::instrument(skip(record), fields(id = %record.id))]
pub fn plan_layers(record: &CraterRecord, opts: PlanOptions) -> LayerPlan {
    let mut recovered = Vec::new();
    let morphology = resolve_morphology(&record.morphology_code);
    let classified = morphology != Morphology::None;

    let mut layers = Vec::with_capacity(LayerSlot::ALL.len());

    let floor_name = if morphology == Morphology::FlatFloor {
        "CpxFF"
    } else {
        "Smp"
    };
    let floor_color = if classified {
        ordinal_color(DegradationField::Rim, record.rim_degradation, &mut recovered)
    } else {
        NEUTRAL_GRAY
    };
    layers.push(LayerDescriptor::new(
        LayerSlot::FloorOutline,
        AssetKey::new(SilhouetteKind::Floor, floor_name),
        floor_color,
        classified,
    ));

    let mut rings = Vec::new();
    for &(index, slot) in ejecta_slots(record.layer_count) {
        let Some(code) = record.ejecta_code(index) else {
            continue;
        };
        rings.push(LayerDescriptor::new(
            slot,
            AssetKey::new(SilhouetteKind::Ejecta, code),
            ordinal_color(
                DegradationField::Ejecta,
                record.ejecta_degradation,
                &mut recovered,
            ),
            true,
        ));
    }
    rings.sort_by_key(|l| l.z_order);
    layers.extend(rings);

    layers.push(LayerDescriptor::new(
        LayerSlot::Rim,
        AssetKey::new(SilhouetteKind::Rim, "rim"),
        ordinal_color(DegradationField::Rim, record.rim_degradation, &mut recovered),
        true,
    ));

    let ground_color = match (classified, opts.is_dark_mode) {
        (false, false) => GROUND_NEUTRAL_LIGHT,
        (false, true) => GROUND_NEUTRAL_DARK,
        (true, false) => GROUND_ACCENT_LIGHT,
        (true, true) => GROUND_ACCENT_DARK,
    };
    layers.push(LayerDescriptor::new(
        LayerSlot::GroundPlane,
        AssetKey::new(SilhouetteKind::Ground, "ground"),
        ground_color,
        false,
    ));

    if let Some(name) = morphology.interior_asset_name() {
        if morphology.is_unknown() {
            recovered.push(Recovery::UnmappedMorphologyCode {
                code: name.to_owned(),
            });
        }
        layers.push(LayerDescriptor::new(
            LayerSlot::InteriorStructure,
            AssetKey::new(SilhouetteKind::Interior, name),
            ordinal_color(
                DegradationField::Floor,
                record.floor_degradation,
                &mut recovered,
            ),
            true,
        ));
    }

    if opts.disable_wave_effect {
        for layer in &mut layers {
            layer.wave_enabled = false;
        }
    }

    for r in &recovered {
        tracing::debug!(recovery = %r, "recovered sparse input");
    }

    LayerPlan { layers, recovered }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;

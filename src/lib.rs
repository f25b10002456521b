//! crater-glyph renders layered procedural glyphs for classified impact craters.
//!
//! A [`CraterRecord`] (morphology code, ejecta layers, degradation ordinals) becomes a fixed
//! stack of up to seven layers. Each layer is a vector silhouette filled with a palette color and,
//! optionally, overlaid with an animated fractal value-noise texture clipped to the silhouette.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `CraterRecord -> LayerPlan` (which layers, in what order, with which colors)
//! 2. **Synthesize**: `Lattice + phase -> 128×128 RGBA` per animated layer ([`NoiseField`])
//! 3. **Composite**: `raster + SilhouetteMask -> CompositedLayer` (fill plus blended overlay)
//! 4. **Drive**: [`AnimationDriver`] owns every layer's clock and mask, advancing them on host
//!    ticks or rendering a single static frame
//! 5. **Export** (optional): [`flatten_layers`] onto a background and encode PNG/JPEG
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: lattices are seeded from the record id, so a record always renders the
//!   same pixels for the same phase.
//! - **Never fails on sparse data**: missing ordinals, unmapped codes and unknown silhouettes are
//!   recovered with documented fallbacks and reported as [`Recovery`] values.
//! - **No IO in the render path**: silhouettes are parsed up front by [`SilhouetteLibrary`] and
//!   [`SvgDirectory`].
//! - **Premultiplied RGBA8** for every composited frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod export;
mod foundation;
mod noise;
mod plan;
mod record;
mod render;
mod session;

pub use assets::directory::SvgDirectory;
pub use assets::silhouette::{
    AssetKey, Silhouette, SilhouetteKind, SilhouetteLibrary, SilhouetteSource,
};
pub use export::still::{
    ExportOptions, Still, StillFormat, encode_still, export_still, save_still,
};
pub use foundation::core::{Frame, Rgba8, Rgba8Premul};
pub use foundation::error::{DegradationField, GlyphError, GlyphResult, Recovery};
pub use noise::field::{FRAME_BYTES, FieldStatus, NoiseField, synthesize_frame};
pub use noise::lattice::{FIELD_SIZE, LATTICE_LEN, Lattice, layer_seed};
pub use plan::morphology::{Morphology, known_morphology_codes, resolve_morphology};
pub use plan::palette::{
    GROUND_ACCENT_DARK, GROUND_ACCENT_LIGHT, GROUND_NEUTRAL_DARK, GROUND_NEUTRAL_LIGHT,
    NEUTRAL_GRAY, degradation_color, level_color,
};
pub use plan::planner::{LayerDescriptor, LayerPlan, LayerSlot, PlanOptions, plan_layers};
pub use record::model::{CraterRecord, DegradationLevel, Ordinal};
pub use render::blend::{BlendMode, PremulRgba8, blend_in_place, over};
pub use render::compositor::{
    CompositedLayer, LayerDrawable, WaveOverlay, blend_for_slot, composite_layer,
};
pub use render::flatten::flatten_layers;
pub use render::mask::SilhouetteMask;
pub use session::driver::{AnimationDriver, LayerId, LayerState, RenderHandle, Rendered};
pub use session::options::{DriverOpts, MAX_RENDER_SIZE, RenderOptions};

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    assets::silhouette::SilhouetteLibrary,
    foundation::error::{GlyphResult, Recovery},
    noise::{
        field::{FieldStatus, NoiseField},
        lattice::layer_seed,
    },
    plan::planner::{LayerDescriptor, plan_layers},
    record::model::CraterRecord,
    render::{
        compositor::{CompositedLayer, composite_layer},
        mask::SilhouetteMask,
    },
    session::options::{DriverOpts, RenderOptions, build_thread_pool},
};

/// Identifies one rendered record inside an [`AnimationDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderHandle(u64);

impl std::fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "render#{}", self.0)
    }
}

/// Key of one layer in the driver's registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

/// Everything the driver owns for one layer.
#[derive(Debug)]
pub struct LayerState {
    /// Registry key.
    pub id: LayerId,
    /// Planned descriptor.
    pub descriptor: LayerDescriptor,
    /// Noise clock and buffer; `None` for layers without a wave overlay.
    pub field: Option<NoiseField>,
    /// Silhouette rasterized at the render size.
    pub mask: SilhouetteMask,
    owner: RenderHandle,
}

/// Result of [`AnimationDriver::render_layers`].
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Handle for ticking, updating and disposing this render.
    pub handle: RenderHandle,
    /// Composited layers, bottom first.
    pub layers: Vec<CompositedLayer>,
    /// Fallbacks taken while planning and resolving silhouettes.
    pub recovered: Vec<Recovery>,
}

#[derive(Debug)]
struct RenderEntry {
    record: CraterRecord,
    render_key: u64,
    options: RenderOptions,
    layers: Vec<LayerId>,
    overlay_opacity: f32,
    layer_opacity: f32,
}

/// Owns per-layer noise clocks and masks for any number of rendered records.
///
/// The host calls [`AnimationDriver::tick`] (or [`AnimationDriver::tick_all`]) once per display
/// frame; the driver never schedules itself. Teardown is explicit via
/// [`AnimationDriver::dispose`].
pub struct AnimationDriver {
    library: SilhouetteLibrary,
    opts: DriverOpts,
    pool: Option<rayon::ThreadPool>,
    disable_animations: bool,
    next_id: u64,
    renders: BTreeMap<RenderHandle, RenderEntry>,
    registry: BTreeMap<LayerId, LayerState>,
}

impl std::fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("opts", &self.opts)
            .field("disable_animations", &self.disable_animations)
            .field("renders", &self.renders.len())
            .field("layers", &self.registry.len())
            .finish()
    }
}

/// Run `step` on every field of `states`, on the pool when one is given.
fn for_each_field(
    pool: Option<&rayon::ThreadPool>,
    mut states: Vec<&mut LayerState>,
    step: impl Fn(&mut NoiseField) + Sync,
) {
    let run = |s: &mut &mut LayerState| {
        if let Some(field) = s.field.as_mut() {
            step(field);
        }
    };
    match pool {
        Some(pool) => pool.install(|| states.par_iter_mut().for_each(run)),
        None => states.iter_mut().for_each(run),
    }
}

impl AnimationDriver {
    /// Create a driver resolving silhouettes from `library`.
    pub fn new(library: SilhouetteLibrary, opts: DriverOpts) -> GlyphResult<Self> {
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self {
            library,
            opts,
            pool,
            disable_animations: false,
            next_id: 0,
            renders: BTreeMap::new(),
            registry: BTreeMap::new(),
        })
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn is_static(&self, options: &RenderOptions) -> bool {
        self.disable_animations || options.disable_animations
    }

    /// Plan `record`, allocate its layers, draw the first frame and composite it.
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    pub fn render_layers(
        &mut self,
        record: &CraterRecord,
        options: RenderOptions,
    ) -> GlyphResult<Rendered> {
        options.validate()?;
        let handle = RenderHandle(self.next_id());
        let (states, recovered) = self.prepare(handle, record, options)?;
        self.install(handle, record, options, states);
        let layers = self.composite(handle)?;
        tracing::debug!(%handle, layers = layers.len(), "rendered");
        Ok(Rendered {
            handle,
            layers,
            recovered,
        })
    }

    /// Plan `record` and allocate its layer states without touching the registry.
    fn prepare(
        &mut self,
        handle: RenderHandle,
        record: &CraterRecord,
        options: RenderOptions,
    ) -> GlyphResult<(Vec<LayerState>, Vec<Recovery>)> {
        let plan = plan_layers(record, options.plan_options());
        let mut recovered = plan.recovered;

        let mut states = Vec::with_capacity(plan.layers.len());
        for descriptor in plan.layers {
            let (silhouette, missing) = self.library.resolve_or_fallback(&descriptor.asset_key);
            recovered.extend(missing);
            let mask = SilhouetteMask::rasterize(&silhouette, options.size)?;

            let field = descriptor.wave_enabled.then(|| {
                let mut field = NoiseField::new(descriptor.anim_speed);
                field.prepare(layer_seed(&record.id, descriptor.z_order, self.opts.seed));
                field
            });

            states.push(LayerState {
                id: LayerId(self.next_id()),
                descriptor,
                field,
                mask,
                owner: handle,
            });
        }

        let freeze = self.is_static(&options);
        for_each_field(self.pool.as_ref(), states.iter_mut().collect(), |field| {
            if freeze {
                field.render_static();
            } else {
                field.advance();
            }
        });
        Ok((states, recovered))
    }

    fn install(
        &mut self,
        handle: RenderHandle,
        record: &CraterRecord,
        options: RenderOptions,
        states: Vec<LayerState>,
    ) {
        let ids = states.iter().map(|s| s.id).collect();
        self.registry.extend(states.into_iter().map(|s| (s.id, s)));
        self.renders.insert(
            handle,
            RenderEntry {
                record: record.clone(),
                render_key: record.render_key(),
                options,
                layers: ids,
                overlay_opacity: 1.0,
                layer_opacity: 1.0,
            },
        );
    }

    fn composite(&self, handle: RenderHandle) -> GlyphResult<Vec<CompositedLayer>> {
        let Some(entry) = self.renders.get(&handle) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(entry.layers.len());
        for id in &entry.layers {
            let Some(state) = self.registry.get(id) else {
                continue;
            };
            let raster = state.field.as_ref().and_then(NoiseField::frame);
            let mut layer =
                composite_layer(&state.descriptor, &state.mask, raster, entry.overlay_opacity)?;
            layer.opacity = entry.layer_opacity;
            out.push(layer);
        }
        Ok(out)
    }

    /// Advance every animating layer of `handle` by its own speed and recomposite.
    ///
    /// Static renders return their existing frame unchanged. `Ok(None)` for unknown or disposed
    /// handles.
    pub fn tick(&mut self, handle: RenderHandle) -> GlyphResult<Option<Vec<CompositedLayer>>> {
        let Some(entry) = self.renders.get(&handle) else {
            return Ok(None);
        };
        if !self.is_static(&entry.options) {
            let states = self
                .registry
                .values_mut()
                .filter(|s| s.owner == handle)
                .collect();
            for_each_field(self.pool.as_ref(), states, |field| {
                field.advance();
            });
        }
        self.composite(handle).map(Some)
    }

    /// [`AnimationDriver::tick`] for every live render, in handle order.
    pub fn tick_all(&mut self) -> GlyphResult<Vec<(RenderHandle, Vec<CompositedLayer>)>> {
        let handles: Vec<RenderHandle> = self.renders.keys().copied().collect();
        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Some(layers) = self.tick(handle)? {
                out.push((handle, layers));
            }
        }
        Ok(out)
    }

    /// Global static switch. `true` halts every layer on its current frame; `false` resumes the
    /// renders that did not ask for static mode themselves, from their current phase.
    pub fn set_disable_animations(&mut self, disable: bool) {
        self.disable_animations = disable;
        for state in self.registry.values_mut() {
            let Some(field) = state.field.as_mut() else {
                continue;
            };
            let own_static = self
                .renders
                .get(&state.owner)
                .is_some_and(|e| e.options.disable_animations);
            if disable || own_static {
                field.render_static();
            } else {
                field.resume();
            }
        }
    }

    /// Current value of the global static switch.
    pub fn animations_disabled(&self) -> bool {
        self.disable_animations
    }

    /// Replace the record behind `handle`.
    ///
    /// When any planning-relevant field changed, every layer is rebuilt from scratch under the
    /// same handle; otherwise nothing happens. The old layers are disposed only once the new ones
    /// are ready, so a failed rebuild leaves the render untouched. Returns whether a rebuild
    /// happened.
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    pub fn update_record(
        &mut self,
        handle: RenderHandle,
        record: &CraterRecord,
    ) -> GlyphResult<bool> {
        let Some(entry) = self.renders.get(&handle) else {
            return Ok(false);
        };
        if entry.render_key == record.render_key() {
            return Ok(false);
        }
        let options = entry.options;
        let (overlay_opacity, layer_opacity) = (entry.overlay_opacity, entry.layer_opacity);

        let (states, _) = self.prepare(handle, record, options)?;
        self.dispose(handle);
        self.install(handle, record, options, states);
        if let Some(entry) = self.renders.get_mut(&handle) {
            entry.overlay_opacity = overlay_opacity;
            entry.layer_opacity = layer_opacity;
        }
        tracing::debug!(%handle, "record changed, rebuilt layers");
        Ok(true)
    }

    /// Fade hook for the wave overlays of `handle`. Returns `false` for unknown handles.
    pub fn set_overlay_opacity(&mut self, handle: RenderHandle, opacity: f32) -> bool {
        match self.renders.get_mut(&handle) {
            Some(entry) => {
                entry.overlay_opacity = opacity.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Fade hook for whole layers of `handle`. Returns `false` for unknown handles.
    pub fn set_layer_opacity(&mut self, handle: RenderHandle, opacity: f32) -> bool {
        match self.renders.get_mut(&handle) {
            Some(entry) => {
                entry.layer_opacity = opacity.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Stop every layer clock of `handle`, free its noise fields, then drop its layers.
    ///
    /// Returns `false` for unknown handles.
    pub fn dispose(&mut self, handle: RenderHandle) -> bool {
        let Some(entry) = self.renders.remove(&handle) else {
            return false;
        };
        for id in &entry.layers {
            if let Some(mut state) = self.registry.remove(id)
                && let Some(field) = state.field.as_mut()
            {
                field.dispose();
            }
        }
        tracing::debug!(%handle, layers = entry.layers.len(), "disposed");
        true
    }

    /// Registry entry for `id`.
    pub fn layer(&self, id: LayerId) -> Option<&LayerState> {
        self.registry.get(&id)
    }

    /// Layers of `handle`, bottom first. Empty for unknown handles.
    pub fn layers(&self, handle: RenderHandle) -> Vec<&LayerState> {
        self.renders
            .get(&handle)
            .map(|e| e.layers.iter().filter_map(|id| self.registry.get(id)).collect())
            .unwrap_or_default()
    }

    /// The record currently behind `handle`.
    pub fn record(&self, handle: RenderHandle) -> Option<&CraterRecord> {
        self.renders.get(&handle).map(|e| &e.record)
    }

    /// Number of live renders.
    pub fn render_count(&self) -> usize {
        self.renders.len()
    }

    /// Number of noise fields still holding a lattice and buffer.
    pub fn live_fields(&self) -> usize {
        self.registry
            .values()
            .filter_map(|s| s.field.as_ref())
            .filter(|f| f.status() != FieldStatus::Disposed)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;

use crate::{
    foundation::error::{GlyphError, GlyphResult},
    plan::planner::PlanOptions,
};

/// Largest accepted output edge, in pixels.
pub const MAX_RENDER_SIZE: u32 = 8192;

/// Per-render display options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Draw a single frame per layer and never advance it.
    pub disable_animations: bool,
    /// Square output edge in pixels.
    pub size: u32,
    /// Dark backgrounds swap the ground-plane colors.
    pub is_dark_mode: bool,
    /// Suppress every noise overlay.
    pub disable_wave_effect: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            disable_animations: false,
            size: 512,
            is_dark_mode: false,
            disable_wave_effect: false,
        }
    }
}

impl RenderOptions {
    /// The subset of options that influences layer planning.
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            is_dark_mode: self.is_dark_mode,
            disable_wave_effect: self.disable_wave_effect,
        }
    }

    /// Reject sizes that cannot be rasterized.
    pub fn validate(&self) -> GlyphResult<()> {
        if self.size == 0 || self.size > MAX_RENDER_SIZE {
            return Err(GlyphError::validation(format!(
                "render size must be in 1..={MAX_RENDER_SIZE}, got {}",
                self.size
            )));
        }
        Ok(())
    }
}

/// Options for an [`crate::AnimationDriver`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DriverOpts {
    /// Synthesize each tick's layers in parallel on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Mixed into every lattice seed; `0` reproduces the canonical textures.
    pub seed: u64,
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> GlyphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GlyphError::validation(
            "driver 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GlyphError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/options.rs"]
mod tests;

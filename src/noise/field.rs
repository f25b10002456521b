use crate::{
    foundation::math::{lerp_quintic, unit_to_u8},
    noise::lattice::{FIELD_SIZE, Lattice},
};

/// Byte length of one synthesized frame (straight RGBA8, `FIELD_SIZE²` pixels).
pub const FRAME_BYTES: usize = FIELD_SIZE * FIELD_SIZE * 4;

/// Phase advance per tick before the per-layer speed multiplier.
const PHASE_STEP: f64 = 1.0 / FIELD_SIZE as f64;

fn ease(x: f64) -> f64 {
    if x > 0.2 {
        0.0
    } else {
        lerp_quintic(1.0, 0.0, x * 6.0)
    }
}

/// Synthesize one straight-alpha RGBA8 frame at phase `t` into `out`.
///
/// Pure: identical lattice and phase give bit-identical bytes. `out` must hold
/// [`FRAME_BYTES`] bytes; row `k` is `y = k/128`, column `j` is `x = j/128`.
pub fn synthesize_frame(lattice: &Lattice, t: f64, out: &mut [u8]) {
    debug_assert_eq!(out.len(), FRAME_BYTES);
    let inv = 1.0 / FIELD_SIZE as f64;
    for (k, row) in out.chunks_exact_mut(FIELD_SIZE * 4).enumerate() {
        let y = k as f64 * inv;
        for (j, px) in row.chunks_exact_mut(4).enumerate() {
            let x = j as f64 * inv;
            let dist = ((x - 0.5) * (x - 0.5) + (y - 0.5) * (y - 0.5)).sqrt();

            let ax = lattice.octaves(x, y);
            let ay = lattice.octaves(x + 2.0, y + t / 3.0);
            let bx = lattice.octaves(x + dist * 0.3 + ax / 22.0 + 0.7, y + ay / 5.0 + 2.0);
            let by = lattice.octaves(x + ax / 3.0 + 4.0 * t, y + ay / 3.0 + 5.0);
            let n = lattice.octaves(x + bx / 5.0, y + by / 2.0) * 0.7 + 0.15;
            let d = ax * by / 2.0;
            let e = ay * bx / 2.0;

            px[0] = unit_to_u8(n + d / 5.0);
            px[1] = unit_to_u8(n / 3.0 + e / 5.0 + d);
            px[2] = unit_to_u8(d + e);
            px[3] = unit_to_u8(1.0 - ease(dist) * (e + d) * 5.0);
        }
    }
}

/// Lifecycle of a [`NoiseField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FieldStatus {
    /// Created, no lattice or buffer yet.
    Uninitialized,
    /// Lattice and buffer allocated, no frame drawn.
    Ready,
    /// Advancing on every tick.
    Animating,
    /// One frame drawn; the clock is halted.
    Static,
    /// Buffer and lattice freed.
    Disposed,
}

/// Per-layer animated noise state: lattice, phase clock and output buffer.
#[derive(Debug)]
pub struct NoiseField {
    status: FieldStatus,
    speed: f64,
    phase: f64,
    lattice: Option<Lattice>,
    buffer: Option<Vec<u8>>,
}

impl NoiseField {
    /// New field advancing by `speed / 128` per tick.
    pub fn new(speed: f64) -> Self {
        Self {
            status: FieldStatus::Uninitialized,
            speed,
            phase: 0.0,
            lattice: None,
            buffer: None,
        }
    }

    /// Build the lattice and allocate the frame buffer. No-op unless uninitialized.
    pub fn prepare(&mut self, seed: u64) {
        if self.status != FieldStatus::Uninitialized {
            return;
        }
        self.lattice = Some(Lattice::from_seed(seed));
        self.buffer = Some(vec![0; FRAME_BYTES]);
        self.status = FieldStatus::Ready;
    }

    fn step(&mut self) -> bool {
        let (Some(lattice), Some(buffer)) = (self.lattice.as_ref(), self.buffer.as_mut()) else {
            return false;
        };
        self.phase += PHASE_STEP * self.speed;
        synthesize_frame(lattice, self.phase, buffer);
        true
    }

    /// Advance the clock one tick and redraw.
    ///
    /// Returns `false` (and changes nothing) unless the field is ready or animating.
    pub fn advance(&mut self) -> bool {
        match self.status {
            FieldStatus::Ready | FieldStatus::Animating => {
                let drawn = self.step();
                if drawn {
                    self.status = FieldStatus::Animating;
                }
                drawn
            }
            _ => false,
        }
    }

    /// Draw exactly one frame and halt.
    ///
    /// A ready field draws its first frame; an animating field halts on its current frame. Returns
    /// whether a frame is available.
    pub fn render_static(&mut self) -> bool {
        match self.status {
            FieldStatus::Ready => {
                let drawn = self.step();
                if drawn {
                    self.status = FieldStatus::Static;
                }
                drawn
            }
            FieldStatus::Animating => {
                self.status = FieldStatus::Static;
                true
            }
            FieldStatus::Static => true,
            FieldStatus::Uninitialized | FieldStatus::Disposed => false,
        }
    }

    /// Resume a halted field from its current phase.
    pub fn resume(&mut self) {
        if self.status == FieldStatus::Static {
            self.status = FieldStatus::Animating;
        }
    }

    /// Stop the clock and free the lattice and buffer.
    pub fn dispose(&mut self) {
        self.lattice = None;
        self.buffer = None;
        self.status = FieldStatus::Disposed;
    }

    /// Current lifecycle state.
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// Current phase `t`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Last drawn frame, straight RGBA8 `128×128`. `None` until a frame has been drawn.
    pub fn frame(&self) -> Option<&[u8]> {
        match self.status {
            FieldStatus::Animating | FieldStatus::Static => self.buffer.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/noise/field.rs"]
mod tests;

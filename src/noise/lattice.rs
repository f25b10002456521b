use crate::foundation::math::{Fnv1a64, lerp_quintic};

/// Edge length of the synthesized raster, in pixels.
pub const FIELD_SIZE: usize = 128;

/// Number of lattice entries (`FIELD_SIZE²`).
pub const LATTICE_LEN: usize = FIELD_SIZE * FIELD_SIZE;

/// SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Fixed table of pseudo-random values in `[-0.5, 0.5)`, built once per layer.
///
/// Lookups hash a 2-D integer coordinate into the 1-D table with `|x·128 + y| mod 16384`, which
/// repeats along diagonals. The resulting axis-aligned tiling is part of the look and is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    values: Box<[f64]>,
}

impl Lattice {
    /// Build a lattice from a seed.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let values = (0..LATTICE_LEN).map(|_| rng.next_f64_01() - 0.5).collect();
        Self { values }
    }

    /// Raw table values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    fn at(&self, ix: i64, iy: i64) -> f64 {
        let i = (ix.wrapping_mul(FIELD_SIZE as i64).wrapping_add(iy)).unsigned_abs()
            % LATTICE_LEN as u64;
        self.values[i as usize]
    }

    /// Quintic-interpolated value noise at `(x, y)`.
    #[inline]
    pub(crate) fn value(&self, x: f64, y: f64) -> f64 {
        let nx = x.floor();
        let ny = y.floor();
        let (fx, fy) = (x - nx, y - ny);
        let (ix, iy) = (nx as i64, ny as i64);
        lerp_quintic(
            lerp_quintic(self.at(ix, iy), self.at(ix + 1, iy), fx),
            lerp_quintic(self.at(ix, iy + 1), self.at(ix + 1, iy + 1), fx),
            fy,
        )
    }

    /// Two-octave sum `p(3x, 4y) + 0.5·p(4x, 5y)`.
    #[inline]
    pub(crate) fn octaves(&self, x: f64, y: f64) -> f64 {
        self.value(x * 3.0, y * 4.0) + self.value(x * 4.0, y * 5.0) * 0.5
    }
}

/// Lattice seed for one layer of one record.
///
/// Stable across runs and platforms so that the same record always renders the same texture.
pub fn layer_seed(record_id: &str, z_order: i32, user_seed: u64) -> u64 {
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ user_seed);
    h.write_bytes(record_id.as_bytes());
    h.write_u8(0);
    h.write_u64(z_order as u64);
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/noise/lattice.rs"]
mod tests;

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniform samples for hub placement and segment parameters.
///
/// The generator never reaches for ambient randomness; callers hand it a source, so tests
/// can script exact placements.
pub trait RandomSource {
    /// Next sample, uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform angle in `[0, 2π)`.
    fn angle(&mut self) -> f64 {
        self.next_f64() * std::f64::consts::TAU
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Deterministic SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seeded generator; equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator seeded from the system clock, for unseeded runs.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos ^ u64::from(std::process::id()).rotate_left(32))
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng64 {
    fn next_f64(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script yields `0.0` forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Script the given samples.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of samples drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/rng.rs"]
mod tests;

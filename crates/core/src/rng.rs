//! RNG module - shape draws and piece colors
//!
//! Shapes are drawn uniformly from the catalog with a small deterministic LCG,
//! so the same seed always produces the same sequence of pieces.
//!
//! Colors come from a pluggable [`ColorSource`]. The default [`WarmPalette`]
//! draws one high, one full-range and one low channel value and shuffles
//! which channel gets which, giving varied but consistently saturated warm
//! colors. Tests use [`FixedColor`] to keep snapshots deterministic.

use crate::shapes::Catalog;
use crate::types::Rgb;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Uniformly pick a catalog index.
pub fn random_shape_index(rng: &mut SimpleRng, catalog: &Catalog) -> usize {
    rng.next_range(catalog.len() as u32) as usize
}

/// Produces the color of each new piece.
pub trait ColorSource {
    fn next_color(&mut self) -> Rgb;
}

/// Default warm, saturated palette.
#[derive(Debug, Clone)]
pub struct WarmPalette {
    rng: SimpleRng,
}

impl WarmPalette {
    pub fn new(seed: u32) -> Self {
        // Decorrelate from the shape stream seeded with the same value.
        Self {
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
        }
    }
}

impl ColorSource for WarmPalette {
    fn next_color(&mut self) -> Rgb {
        let mut channels = [
            192 + self.rng.next_range(64) as u8,
            self.rng.next_range(256) as u8,
            self.rng.next_range(192) as u8,
        ];
        self.rng.shuffle(&mut channels);
        Rgb::new(channels[0], channels[1], channels[2])
    }
}

/// Always the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColor(pub Rgb);

impl ColorSource for FixedColor {
    fn next_color(&mut self) -> Rgb {
        self.0
    }
}

/// Cycles through a fixed list of colors.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    colors: Vec<Rgb>,
    next: usize,
}

impl ColorCycle {
    /// Panics if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Self {
        assert!(!colors.is_empty(), "ColorCycle needs at least one color");
        Self { colors, next: 0 }
    }
}

impl ColorSource for ColorCycle {
    fn next_color(&mut self) -> Rgb {
        let color = self.colors[self.next];
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}

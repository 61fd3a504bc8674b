//! Pixel-space pseudo-random numbers.
//!
//! Every pixel owns a tiny two-component state seeded from its screen
//! coordinate and three per-frame scalars. No state is shared between pixels,
//! so a frame can be evaluated in any order and in parallel, and the same
//! pixel with the same seeds always produces the same stream.

use glint_math::{Vec2, Vec3};
use rand::Rng;

/// Per-frame global random scalars, each uniform in [-1, 1].
///
/// `random1` and `random2` double as the camera jitter for the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSeeds {
    pub random1: f32,
    pub random2: f32,
    pub random3: f32,
}

impl FrameSeeds {
    pub fn new(random1: f32, random2: f32, random3: f32) -> Self {
        Self {
            random1,
            random2,
            random3,
        }
    }

    /// Draw a fresh set of seeds for the next frame.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            random1: rng.gen_range(-1.0..=1.0),
            random2: rng.gen_range(-1.0..=1.0),
            random3: rng.gen_range(-1.0..=1.0),
        }
    }

    /// Sub-pixel camera offset for this frame.
    pub fn jitter(&self) -> Vec2 {
        Vec2::new(self.random1, self.random2)
    }
}

/// Sine/fract hash of a 2D point, in [0, 1].
fn hash(st: Vec2) -> f32 {
    // Evaluated in f64: the product below loses most of its fractional bits in f32.
    let x = (st.x as f64 * 12.9898 + st.y as f64 * 78.233).sin() * 43758.5453123;
    (x - x.floor()) as f32
}

/// Hash remapped to [-1, 1].
fn signed_hash(st: Vec2) -> f32 {
    hash(st) * 2.0 - 1.0
}

/// Deterministic random stream for one pixel in one frame.
#[derive(Debug, Clone)]
pub struct PixelRng {
    state: Vec2,
    origin: Vec2,
    seeds: FrameSeeds,
}

impl PixelRng {
    /// Seed a stream from a pixel's screen coordinate and the frame's seeds.
    pub fn new(pixel: Vec2, seeds: FrameSeeds) -> Self {
        let origin = Vec2::new(
            signed_hash(pixel + Vec2::new(3.75 * seeds.random1, 6.98)),
            signed_hash(pixel + Vec2::new(7.53, 9.38 * seeds.random2)),
        )
        .try_normalize()
        .unwrap_or(Vec2::X);

        Self {
            state: origin,
            origin,
            seeds,
        }
    }

    /// Next value, uniform-ish in [-1, 1].
    pub fn next_f32(&mut self) -> f32 {
        let value = signed_hash(self.state * self.seeds.random2);

        let x = self.seeds.random2 * (self.state.x * value + self.state.y * value);
        let y = self.seeds.random3 * (x / value + self.state.y / value);

        // A zero draw or a zero seed collapses the state; restart from the seed point.
        self.state = Vec2::new(x, y).try_normalize().unwrap_or(self.origin);

        value
    }

    /// Next value remapped to [0, 1].
    pub fn next_unit(&mut self) -> f32 {
        (self.next_f32() + 1.0) / 2.0
    }

    /// Random point in the cube [-1, 1]^3.
    pub fn next_vec3(&mut self) -> Vec3 {
        // Evaluation order of the three draws is fixed: x, then y, then z.
        let x = self.next_f32();
        let y = self.next_f32();
        let z = self.next_f32();
        Vec3::new(x, y, z)
    }
}

//! Planet surface height field and spawn sampling.
//!
//! **Seed-based determinism:** the height field is a fixed layered-sine
//! formula: a pure function of the query direction with no tables and no
//! hidden state. Surface sampling draws from a `StdRng` seeded with the
//! planet seed, so the same seed replays the same spawn sequence.

use rand::prelude::*;
use sim_core::Vec3;

/// Radial clearance added above the terrain when seating objects on it.
pub const SURFACE_CLEARANCE: f32 = 1.0;

/// Octave layout of the height field: (frequency, amplitude).
const OCTAVES: [(f32, f32); 3] = [(0.01, 200.0), (0.02, 100.0), (0.04, 50.0)];

/// Periodic scalar field over a 3D point, range [-1, 1]. The per-axis
/// multipliers are deliberately unequal so the pattern does not repeat
/// identically along any axis.
#[inline]
fn layered_wave(v: Vec3) -> f32 {
    ((4.0 * v.x).sin() + (7.0 * v.y).sin() + (5.0 * v.z).sin()) / 3.0
}

/// Procedural height field over a sphere centered at the world origin.
pub struct PlanetTerrain {
    radius: f32,
    rng: StdRng,
}

impl PlanetTerrain {
    /// `radius` must be positive; the session validates its configuration
    /// before constructing the terrain.
    pub fn new(radius: f32, seed: u64) -> Self {
        debug_assert!(radius > 0.0, "planet radius must be positive");
        log::info!("planet surface ready: radius {radius}, seed {seed}");
        Self {
            radius,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Terrain height above the base sphere along a unit `direction`.
    /// Pure: identical input returns a bit-for-bit identical result.
    pub fn height_at(&self, direction: Vec3) -> f32 {
        OCTAVES
            .iter()
            .map(|&(frequency, amplitude)| layered_wave(direction * frequency) * amplitude)
            .sum()
    }

    /// Surface normal at a world position. The base shape is a sphere, so
    /// this is the radial direction.
    pub fn normal_at(&self, position: Vec3) -> Vec3 {
        position.normalize()
    }

    /// Seat a point on the terrain along `direction`, standard clearance
    /// above the ground.
    pub fn surface_point(&self, direction: Vec3) -> Vec3 {
        let dir = direction.normalize();
        dir * (self.radius + self.height_at(dir) + SURFACE_CLEARANCE)
    }

    /// Uniformly distributed random point on the terrain surface.
    pub fn random_surface_point(&mut self) -> Vec3 {
        let dir = random_unit_vector(&mut self.rng);
        self.surface_point(dir)
    }

    /// Whether the ground at `position` is level enough to place a unit:
    /// the angle between the surface normal and world up must stay within
    /// `max_slope_degrees`.
    pub fn is_valid_spawn(&self, position: Vec3, max_slope_degrees: f32) -> bool {
        let cos_angle = self.normal_at(position).dot(Vec3::Y).clamp(-1.0, 1.0);
        cos_angle.acos().to_degrees() <= max_slope_degrees
    }
}

/// Uniform direction on the unit sphere (uniform z, uniform azimuth).
fn random_unit_vector(rng: &mut StdRng) -> Vec3 {
    let z = rng.gen_range(-1.0_f32..=1.0);
    let azimuth = rng.gen_range(0.0_f32..std::f32::consts::TAU);
    let ring = (1.0 - z * z).sqrt();
    Vec3::new(ring * azimuth.cos(), ring * azimuth.sin(), z)
}

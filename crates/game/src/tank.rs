//! Patrolling ground tank: the targetable unit the weapons resolve against.
//!
//! A tank walks straight legs between randomly chosen surface points and
//! dies exactly once; the destroyed state is terminal and further damage
//! is ignored.

use glam::{Quat, Vec3};
use physics::Aabb;
use procgen::PlanetTerrain;
use rand::prelude::*;
use sim_core::Health;

use crate::weapons::Target;

/// Ground speed along a patrol leg.
const PATROL_SPEED: f32 = 10.0;
/// Arriving inside this radius of the patrol target triggers a re-roll.
const ARRIVAL_RADIUS: f32 = 10.0;
/// Patrol leg length range.
const PATROL_LEG: std::ops::Range<f32> = 50.0..150.0;
/// Hull half extents in local space (x across, y up, z along the barrel).
const TANK_HALF_EXTENTS: Vec3 = Vec3::new(3.0, 2.0, 4.2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankState {
    Patrolling,
    Destroyed,
}

pub struct Tank {
    pub position: Vec3,
    /// Yawed to face the current motion direction.
    pub facing: Quat,
    pub patrol_target: Vec3,
    health: Health,
    state: TankState,
}

impl Tank {
    /// Place a tank at `position` with its first patrol leg already rolled.
    pub fn new(position: Vec3, hp: f32, planet: &PlanetTerrain, rng: &mut StdRng) -> Self {
        let patrol_target = next_patrol_target(position, planet, rng);
        Self {
            position,
            facing: Quat::IDENTITY,
            patrol_target,
            health: Health::new(hp),
            state: TankState::Patrolling,
        }
    }

    /// Walk toward the patrol target; re-roll the leg on arrival.
    pub fn update(&mut self, dt: f32, planet: &PlanetTerrain, rng: &mut StdRng) {
        if self.state == TankState::Destroyed {
            return;
        }

        if self.position.distance(self.patrol_target) < ARRIVAL_RADIUS {
            self.patrol_target = next_patrol_target(self.position, planet, rng);
        }

        let direction = (self.patrol_target - self.position).normalize_or_zero();
        if direction != Vec3::ZERO {
            self.position += direction * PATROL_SPEED * dt;
            self.facing = Quat::from_rotation_arc(Vec3::NEG_Z, direction);
        }
    }

    pub fn state(&self) -> TankState {
        self.state
    }

    pub fn health(&self) -> &Health {
        &self.health
    }
}

impl Target for Tank {
    fn position(&self) -> Vec3 {
        self.position
    }

    /// Recomputed from the current placement on every query.
    fn bounding_volume(&self) -> Aabb {
        Aabb::of_rotated_box(self.position, TANK_HALF_EXTENTS, self.facing)
    }

    fn take_damage(&mut self, amount: f32) -> bool {
        if self.state == TankState::Destroyed {
            return false;
        }
        self.health.take_damage(amount);
        if self.health.is_dead() {
            self.state = TankState::Destroyed;
            return true;
        }
        false
    }

    fn is_alive(&self) -> bool {
        self.state == TankState::Patrolling
    }
}

/// Random bearing in the tangent plane, random leg length, seated back on
/// the terrain.
fn next_patrol_target(position: Vec3, planet: &PlanetTerrain, rng: &mut StdRng) -> Vec3 {
    let normal = planet.normal_at(position);
    let (east, north) = normal.any_orthonormal_pair();
    let bearing = rng.gen_range(0.0_f32..std::f32::consts::TAU);
    let length = rng.gen_range(PATROL_LEG);
    let offset = (east * bearing.cos() + north * bearing.sin()) * length;
    planet.surface_point(position + offset)
}

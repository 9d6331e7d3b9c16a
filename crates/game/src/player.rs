//! Player aircraft: a continuous integrator flying under planet-centric
//! gravity. Throttle ramps smoothly, velocity carries inertia, and weapon
//! mounts ride the visual orientation so muzzle and bay positions match
//! what the renderer draws.

use glam::{Quat, Vec3};
use sim_core::Health;

use crate::config::PlayerConfig;
use crate::input::FlightInput;

/// Spawn height above the planet's base radius.
const SPAWN_ALTITUDE: f32 = 100.0;
/// Hard floor: the hull never descends below this altitude.
const MIN_ALTITUDE: f32 = 5.0;
/// Gravity strength at zero altitude.
const SURFACE_GRAVITY: f32 = 50.0;
/// Altitude at which gravity has faded to nothing.
const GRAVITY_FADE_ALTITUDE: f32 = 1000.0;
/// Throttle response: speed closes the gap to commanded speed at this rate.
const SPEED_RESPONSE: f32 = 2.0;
/// Velocity smoothing: blend factor per second (higher = snappier, lower = more inertia).
const VELOCITY_SMOOTH: f32 = 3.0;

/// Wing gun muzzles, nose gun, and bomb bay in airframe-local space.
const LEFT_GUN_MOUNT: Vec3 = Vec3::new(-7.0, -0.5, -6.0);
const RIGHT_GUN_MOUNT: Vec3 = Vec3::new(7.0, -0.5, -6.0);
const NOSE_MOUNT: Vec3 = Vec3::new(0.0, -0.5, -8.0);
const BOMB_BAY_MOUNT: Vec3 = Vec3::new(0.0, -2.0, 0.0);

/// The player-controlled aircraft.
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Visual orientation: the travel direction with the control rotation
    /// composed on top. Mount points and forward queries derive from this.
    pub orientation: Quat,
    control: Quat,
    speed: f32,
    health: Health,
    max_speed: f32,
    drag: f32,
    planet_radius: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig, planet_radius: f32) -> Self {
        Self {
            position: Self::spawn_position(planet_radius),
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            control: Quat::IDENTITY,
            speed: 0.0,
            health: Health::new(config.hp),
            max_speed: config.max_speed,
            drag: config.drag,
            planet_radius,
        }
    }

    fn spawn_position(planet_radius: f32) -> Vec3 {
        Vec3::Y * (planet_radius + SPAWN_ALTITUDE)
    }

    /// Integrate one tick of flight from the current input record.
    pub fn update(&mut self, dt: f32, input: &FlightInput) {
        let input = input.clamped();

        // Throttle commands a target speed; actual speed eases toward it.
        let target_speed = input.throttle * self.max_speed;
        self.speed += (target_speed - self.speed) * (SPEED_RESPONSE * dt).min(1.0);

        // Pitch and yaw drive the control rotation directly (no roll).
        self.control = Quat::from_rotation_y(input.yaw) * Quat::from_rotation_x(input.pitch);
        let forward = self.control * Vec3::NEG_Z;

        let blend = (VELOCITY_SMOOTH * dt).min(1.0);
        self.velocity += (forward * self.speed - self.velocity) * blend;
        self.position += self.velocity * dt;

        // Gravity pulls toward the planet center, fading out with altitude.
        let strength = (1.0 - self.altitude() / GRAVITY_FADE_ALTITUDE).max(0.0) * SURFACE_GRAVITY;
        self.velocity -= self.position.normalize_or_zero() * strength * dt;

        let min_radius = self.planet_radius + MIN_ALTITUDE;
        if self.position.length() < min_radius {
            // Hard stop on the deck, not a bounce.
            self.position = self.position.normalize_or_zero() * min_radius;
            self.velocity = Vec3::ZERO;
        }

        self.velocity *= 1.0 - self.drag * dt;

        // Nose follows the travel direction with the control rotation on
        // top; with no measurable motion the previous orientation stands.
        let travel = self.velocity.normalize_or_zero();
        if travel != Vec3::ZERO {
            self.orientation = Quat::from_rotation_arc(Vec3::NEG_Z, travel) * self.control;
        }
    }

    /// World-space forward of the current orientation (not the velocity).
    pub fn forward_dir(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Left and right wing-gun muzzle positions in world space.
    pub fn gun_mount_positions(&self) -> [Vec3; 2] {
        [
            self.position + self.orientation * LEFT_GUN_MOUNT,
            self.position + self.orientation * RIGHT_GUN_MOUNT,
        ]
    }

    pub fn nose_mount_position(&self) -> Vec3 {
        self.position + self.orientation * NOSE_MOUNT
    }

    pub fn bomb_bay_position(&self) -> Vec3 {
        self.position + self.orientation * BOMB_BAY_MOUNT
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Height above the planet's base radius.
    pub fn altitude(&self) -> f32 {
        self.position.length() - self.planet_radius
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health.take_damage(amount);
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Restore spawn position, zero motion, and full health.
    pub fn reset(&mut self) {
        self.position = Self::spawn_position(self.planet_radius);
        self.velocity = Vec3::ZERO;
        self.orientation = Quat::IDENTITY;
        self.control = Quat::IDENTITY;
        self.speed = 0.0;
        self.health = Health::new(self.health.max);
    }
}

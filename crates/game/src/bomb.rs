//! Ballistic bomb: free fall toward the planet, blast resolved on impact.

use glam::Vec3;
use sim_core::Lifetime;

/// Acceleration toward the planet center while falling, units/s^2.
const BOMB_GRAVITY: f32 = 20.0;
/// Seconds a bomb may fall before it self-detonates.
const BOMB_LIFETIME: f32 = 10.0;
/// Ground-contact slack above the base sphere radius.
const GROUND_EPSILON: f32 = 0.5;

/// Blast radius of the explosion.
pub const BOMB_EXPLOSION_RADIUS: f32 = 15.0;
/// Damage applied to every live target inside the blast.
pub const BOMB_DAMAGE: f32 = 150.0;

/// A dropped bomb in free fall. Inherits the aircraft's velocity at release.
#[derive(Debug, Clone, Copy)]
pub struct Bomb {
    pub position: Vec3,
    pub velocity: Vec3,
    lifetime: Lifetime,
    exploded: bool,
}

impl Bomb {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            lifetime: Lifetime::new(BOMB_LIFETIME),
            exploded: false,
        }
    }

    /// Advance the fall. Returns true on the tick the bomb becomes inert
    /// (ground contact or timeout) so its blast can be resolved; the blast
    /// fires at most once per bomb.
    pub fn update(&mut self, dt: f32, planet_radius: f32) -> bool {
        if self.exploded {
            return false;
        }
        let expired = self.lifetime.update(dt);
        let down = -self.position.normalize_or_zero();
        self.velocity += down * BOMB_GRAVITY * dt;
        self.position += self.velocity * dt;

        if expired || self.position.length() <= planet_radius + GROUND_EPSILON {
            self.exploded = true;
            return true;
        }
        false
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerates_toward_the_planet_center() {
        let mut bomb = Bomb::new(Vec3::new(0.0, 5100.0, 0.0), Vec3::new(40.0, 0.0, 0.0));
        let before = bomb.velocity.y;
        bomb.update(0.1, 5000.0);
        assert!(bomb.velocity.y < before);
        // Inherited forward velocity is kept.
        assert!(bomb.velocity.x > 39.0);
    }

    #[test]
    fn detonates_on_ground_contact() {
        let mut bomb = Bomb::new(Vec3::new(0.0, 5001.0, 0.0), Vec3::new(0.0, -30.0, 0.0));
        let mut exploded_on = None;
        for step in 0..20 {
            if bomb.update(1.0 / 60.0, 5000.0) {
                exploded_on = Some(step);
                break;
            }
        }
        assert!(exploded_on.is_some());
        assert!(bomb.exploded());
        assert!(bomb.position.length() <= 5000.5);
    }

    #[test]
    fn detonates_on_timeout_in_midair() {
        // High above the deck with no downward speed: 10 s of fall covers
        // ~1000 units, well short of the 3000 up here.
        let mut bomb = Bomb::new(Vec3::new(0.0, 8000.0, 0.0), Vec3::ZERO);
        let mut ticks = 0;
        while !bomb.update(0.5, 5000.0) {
            ticks += 1;
            assert!(ticks < 30, "bomb never timed out");
        }
        assert!(bomb.exploded());
        assert!(bomb.position.length() > 6000.0);
    }

    #[test]
    fn update_after_detonation_is_inert() {
        let mut bomb = Bomb::new(Vec3::new(0.0, 5000.4, 0.0), Vec3::ZERO);
        assert!(bomb.update(0.1, 5000.0));
        let frozen = bomb.position;
        assert!(!bomb.update(0.1, 5000.0));
        assert_eq!(bomb.position, frozen);
    }
}

//! Rate-limited weapon systems: hit-scan wing guns, nose-gun projectiles,
//! and gravity bombs, resolved against whatever targets the session hands
//! in for the tick.

use std::sync::Arc;

use physics::{Aabb, Ray};
use sim_core::{Clock, Lifetime, Vec3};

use crate::bomb::{Bomb, BOMB_DAMAGE, BOMB_EXPLOSION_RADIUS};
use crate::config::WeaponConfig;
use crate::events::{CombatEvent, WeaponKind};

/// Farthest distance at which hit-scan fire connects.
pub const MAX_RANGE: f32 = 2000.0;
/// Proximity at which a nose-gun round detonates against a target.
const BULLET_COLLISION_RADIUS: f32 = 10.0;
/// Seconds a nose-gun round survives.
const BULLET_LIFETIME: f32 = 2.2;
/// Muzzle-velocity bump applied to nose-gun rounds.
const BULLET_SPEED_FACTOR: f32 = 1.05;
/// Nose-gun rounds hit at half the wing-gun damage.
const NOSE_DAMAGE_FACTOR: f32 = 0.5;
/// Bomb releases per second.
const BOMB_RATE: f32 = 1.0;
/// Heat added per wing-gun volley, capped at 1.
const HEAT_PER_SHOT: f32 = 0.15;
/// Heat shed per second.
const HEAT_DECAY: f32 = 0.4;

/// Anything the weapons can shoot at. Implemented by damageable actors; the
/// session passes a transient slice each tick, never a retained reference.
pub trait Target {
    fn position(&self) -> Vec3;
    fn bounding_volume(&self) -> Aabb;
    /// Apply damage. Returns true exactly when this call destroyed the
    /// target; dead targets ignore further damage and return false.
    fn take_damage(&mut self, amount: f32) -> bool;
    fn is_alive(&self) -> bool;
}

/// Outcome of a wing-gun volley request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The rate limiter rejected the request (or no ray was usable);
    /// nothing fired and no cooldown was consumed on the degenerate path.
    NotReady,
    /// The volley fired but connected with nothing.
    Missed,
    /// The volley fired and hit the target at this index in the slice.
    Hit(usize),
}

/// A nose-gun round in flight.
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub position: Vec3,
    pub velocity: Vec3,
    lifetime: Lifetime,
}

/// Rate limiter for one weapon, stamped against the injected clock.
#[derive(Debug, Clone, Copy)]
struct FireControl {
    last_fired_at: f64,
    interval: f64,
}

impl FireControl {
    fn new(rate_per_second: f32) -> Self {
        Self {
            last_fired_at: f64::NEG_INFINITY,
            interval: 1.0 / rate_per_second as f64,
        }
    }

    /// True when the weapon's interval has elapsed; stamps the clock only
    /// on success, so rejected calls never push the window forward.
    fn try_fire(&mut self, now: f64) -> bool {
        if now - self.last_fired_at < self.interval {
            return false;
        }
        self.last_fired_at = now;
        true
    }
}

/// Owns the in-flight ordnance and all fire timing.
pub struct WeaponSystem {
    clock: Arc<dyn Clock>,
    damage: f32,
    bullet_speed: f32,
    planet_radius: f32,
    wing_guns: FireControl,
    nose_gun: FireControl,
    bomb_bay: FireControl,
    heat: f32,
    bullets: Vec<Bullet>,
    bombs: Vec<Bomb>,
}

impl WeaponSystem {
    pub fn new(config: &WeaponConfig, planet_radius: f32, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            damage: config.damage,
            bullet_speed: config.bullet_speed,
            planet_radius,
            wing_guns: FireControl::new(config.fire_rate),
            nose_gun: FireControl::new(config.nose_fire_rate),
            bomb_bay: FireControl::new(BOMB_RATE),
            heat: 0.0,
            bullets: Vec::new(),
            bombs: Vec::new(),
        }
    }

    /// Fire the wing-gun volley: one (origin, direction) ray per gun.
    ///
    /// Among all live targets within [`MAX_RANGE`] whose bounding volume any
    /// ray crosses, the one closest to its ray's origin is hit; exactly
    /// one damage application per volley. Equidistant candidates resolve to
    /// the first encountered in slice order.
    pub fn fire_wing_guns<T: Target>(
        &mut self,
        muzzles: &[(Vec3, Vec3)],
        targets: &mut [T],
        events: &mut Vec<CombatEvent>,
    ) -> ShotOutcome {
        let rays: Vec<Ray> = muzzles
            .iter()
            .filter_map(|&(origin, direction)| Ray::new(origin, direction))
            .collect();
        if rays.is_empty() {
            return ShotOutcome::NotReady;
        }
        if !self.wing_guns.try_fire(self.clock.now()) {
            return ShotOutcome::NotReady;
        }

        self.heat = (self.heat + HEAT_PER_SHOT).min(1.0);
        for ray in &rays {
            events.push(CombatEvent::WeaponFired {
                kind: WeaponKind::WingGuns,
                origin: ray.origin,
            });
        }

        let mut best: Option<(usize, f32)> = None;
        for (index, target) in targets.iter().enumerate() {
            if !target.is_alive() {
                continue;
            }
            let volume = target.bounding_volume();
            for ray in &rays {
                let distance = (target.position() - ray.origin).length();
                if distance > MAX_RANGE {
                    continue;
                }
                if ray.intersect_aabb(&volume).is_none() {
                    continue;
                }
                if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                    best = Some((index, distance));
                }
            }
        }

        match best {
            Some((index, _)) => {
                Self::report_damage(&mut targets[index], self.damage, WeaponKind::WingGuns, events);
                ShotOutcome::Hit(index)
            }
            None => ShotOutcome::Missed,
        }
    }

    /// Spawn a nose-gun round. Independent, higher-cadence rate limit.
    pub fn fire_nose_gun(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let Some(ray) = Ray::new(origin, direction) else {
            return false;
        };
        if !self.nose_gun.try_fire(self.clock.now()) {
            return false;
        }
        self.bullets.push(Bullet {
            position: ray.origin,
            velocity: ray.direction * self.bullet_speed * BULLET_SPEED_FACTOR,
            lifetime: Lifetime::new(BULLET_LIFETIME),
        });
        events.push(CombatEvent::WeaponFired {
            kind: WeaponKind::NoseGun,
            origin,
        });
        true
    }

    /// Release a bomb that inherits `velocity` (the aircraft's at drop).
    pub fn drop_bomb(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if !self.bomb_bay.try_fire(self.clock.now()) {
            return false;
        }
        self.bombs.push(Bomb::new(position, velocity));
        events.push(CombatEvent::WeaponFired {
            kind: WeaponKind::Bomb,
            origin: position,
        });
        true
    }

    /// Advance heat decay and all in-flight ordnance for one tick.
    pub fn update<T: Target>(
        &mut self,
        dt: f32,
        targets: &mut [T],
        events: &mut Vec<CombatEvent>,
    ) {
        self.heat = (self.heat - HEAT_DECAY * dt).max(0.0);
        self.update_bullets(dt, targets, events);
        self.update_bombs(dt, targets, events);
    }

    fn update_bullets<T: Target>(
        &mut self,
        dt: f32,
        targets: &mut [T],
        events: &mut Vec<CombatEvent>,
    ) {
        let damage = self.damage * NOSE_DAMAGE_FACTOR;
        let mut index = 0;
        while index < self.bullets.len() {
            let expired = self.bullets[index].lifetime.update(dt);
            let step = self.bullets[index].velocity * dt;
            self.bullets[index].position += step;
            let position = self.bullets[index].position;

            // First live target in slice order within reach eats the round.
            let struck = targets.iter_mut().find(|target| {
                target.is_alive()
                    && target.position().distance(position) <= BULLET_COLLISION_RADIUS
            });
            if let Some(target) = struck {
                Self::report_damage(target, damage, WeaponKind::NoseGun, events);
                self.bullets.swap_remove(index);
                continue;
            }
            if expired {
                self.bullets.swap_remove(index);
                continue;
            }
            index += 1;
        }
    }

    fn update_bombs<T: Target>(
        &mut self,
        dt: f32,
        targets: &mut [T],
        events: &mut Vec<CombatEvent>,
    ) {
        let mut index = 0;
        while index < self.bombs.len() {
            if self.bombs[index].update(dt, self.planet_radius) {
                let bomb = self.bombs.swap_remove(index);
                Self::resolve_blast(&bomb, targets, events);
                continue;
            }
            index += 1;
        }
    }

    /// One-shot blast query at the bomb's final position: every live target
    /// within the blast radius (inclusive) takes the full bomb damage.
    fn resolve_blast<T: Target>(bomb: &Bomb, targets: &mut [T], events: &mut Vec<CombatEvent>) {
        events.push(CombatEvent::BombExploded {
            position: bomb.position,
            radius: BOMB_EXPLOSION_RADIUS,
        });
        for target in targets.iter_mut() {
            if !target.is_alive() {
                continue;
            }
            if target.position().distance(bomb.position) > BOMB_EXPLOSION_RADIUS {
                continue;
            }
            Self::report_damage(target, BOMB_DAMAGE, WeaponKind::Bomb, events);
        }
    }

    fn report_damage<T: Target>(
        target: &mut T,
        damage: f32,
        kind: WeaponKind,
        events: &mut Vec<CombatEvent>,
    ) {
        let position = target.position();
        if target.take_damage(damage) {
            events.push(CombatEvent::TargetDestroyed { position, kind });
        } else {
            events.push(CombatEvent::TargetHit { position, kind });
        }
    }

    /// Cosmetic accumulator in [0, 1]; no effect on damage or accuracy.
    pub fn heat_level(&self) -> f32 {
        self.heat
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Health, ManualClock};

    struct Dummy {
        position: Vec3,
        health: Health,
        half_extents: Vec3,
        destroyed_reports: u32,
    }

    impl Dummy {
        fn at(position: Vec3) -> Self {
            Self {
                position,
                health: Health::new(100.0),
                half_extents: Vec3::ONE,
                destroyed_reports: 0,
            }
        }
    }

    impl Target for Dummy {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn bounding_volume(&self) -> Aabb {
            Aabb::from_center_half_extents(self.position, self.half_extents)
        }

        fn take_damage(&mut self, amount: f32) -> bool {
            if self.health.is_dead() {
                return false;
            }
            self.health.take_damage(amount);
            if self.health.is_dead() {
                self.destroyed_reports += 1;
                return true;
            }
            false
        }

        fn is_alive(&self) -> bool {
            !self.health.is_dead()
        }
    }

    fn system() -> (WeaponSystem, ManualClock) {
        let clock = ManualClock::new();
        let system = WeaponSystem::new(
            &WeaponConfig::default(),
            5000.0,
            Arc::new(clock.clone()),
        );
        (system, clock)
    }

    fn forward_muzzles() -> [(Vec3, Vec3); 2] {
        [(Vec3::ZERO, -Vec3::Z), (Vec3::new(0.5, 0.0, 0.0), -Vec3::Z)]
    }

    #[test]
    fn rate_limit_allows_one_volley_per_interval() {
        let (mut system, clock) = system();
        let mut targets: Vec<Dummy> = Vec::new();
        let mut events = Vec::new();

        // fire_rate 5 => one volley per 0.2 s of clock time.
        assert_eq!(
            system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events),
            ShotOutcome::Missed
        );
        clock.advance(0.1);
        assert_eq!(
            system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events),
            ShotOutcome::NotReady
        );
        clock.advance(0.1);
        assert_eq!(
            system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events),
            ShotOutcome::Missed
        );
    }

    #[test]
    fn closest_target_on_the_ray_wins() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        let mut targets = vec![
            Dummy::at(Vec3::new(0.0, 0.0, -20.0)),
            Dummy::at(Vec3::new(0.0, 0.0, -10.0)),
        ];

        let outcome = system.fire_wing_guns(
            &[(Vec3::ZERO, -Vec3::Z)],
            &mut targets,
            &mut events,
        );
        assert_eq!(outcome, ShotOutcome::Hit(1));
        assert_eq!(targets[1].health.current, 50.0);
        assert_eq!(targets[0].health.current, 100.0);
    }

    #[test]
    fn equidistant_targets_resolve_to_first_in_order() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        // Both volumes overlap the same spot on the ray.
        let mut targets = vec![
            Dummy::at(Vec3::new(0.0, 0.0, -15.0)),
            Dummy::at(Vec3::new(0.0, 0.0, -15.0)),
        ];

        let outcome = system.fire_wing_guns(
            &[(Vec3::ZERO, -Vec3::Z)],
            &mut targets,
            &mut events,
        );
        assert_eq!(outcome, ShotOutcome::Hit(0));
    }

    #[test]
    fn out_of_range_targets_are_skipped() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        let mut targets = vec![Dummy::at(Vec3::new(0.0, 0.0, -(MAX_RANGE + 500.0)))];

        let outcome = system.fire_wing_guns(
            &[(Vec3::ZERO, -Vec3::Z)],
            &mut targets,
            &mut events,
        );
        assert_eq!(outcome, ShotOutcome::Missed);
        assert_eq!(targets[0].health.current, 100.0);
    }

    #[test]
    fn dead_targets_are_skipped() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        let mut near = Dummy::at(Vec3::new(0.0, 0.0, -10.0));
        near.health.take_damage(100.0);
        let mut targets = vec![near, Dummy::at(Vec3::new(0.0, 0.0, -30.0))];

        let outcome = system.fire_wing_guns(
            &[(Vec3::ZERO, -Vec3::Z)],
            &mut targets,
            &mut events,
        );
        assert_eq!(outcome, ShotOutcome::Hit(1));
    }

    #[test]
    fn volley_applies_damage_once_even_when_both_rays_connect() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        let mut targets = vec![Dummy::at(Vec3::new(0.25, 0.0, -10.0))];

        let outcome = system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events);
        assert_eq!(outcome, ShotOutcome::Hit(0));
        assert_eq!(targets[0].health.current, 50.0);
    }

    #[test]
    fn degenerate_rays_do_not_consume_the_cooldown() {
        let (mut system, _clock) = system();
        let mut targets: Vec<Dummy> = Vec::new();
        let mut events = Vec::new();

        assert_eq!(
            system.fire_wing_guns(&[(Vec3::ZERO, Vec3::ZERO)], &mut targets, &mut events),
            ShotOutcome::NotReady
        );
        // The window was not stamped: an immediate good volley still fires.
        assert_eq!(
            system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events),
            ShotOutcome::Missed
        );
    }

    #[test]
    fn destroying_hit_emits_destroyed_event_once() {
        let (mut system, clock) = system();
        let mut events = Vec::new();
        let mut targets = vec![Dummy::at(Vec3::new(0.0, 0.0, -10.0))];

        system.fire_wing_guns(&[(Vec3::ZERO, -Vec3::Z)], &mut targets, &mut events);
        clock.advance(0.2);
        system.fire_wing_guns(&[(Vec3::ZERO, -Vec3::Z)], &mut targets, &mut events);

        let destroyed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, CombatEvent::TargetDestroyed { .. }))
            .collect();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(targets[0].destroyed_reports, 1);
        assert!(!targets[0].is_alive());
    }

    #[test]
    fn nose_gun_round_strikes_first_target_in_reach() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        let mut targets = vec![Dummy::at(Vec3::new(0.0, 0.0, -50.0))];

        assert!(system.fire_nose_gun(Vec3::ZERO, -Vec3::Z, &mut events));
        // 420 units/s: inside the 10-unit reach within a few hundredths.
        for _ in 0..12 {
            system.update(0.01, &mut targets, &mut events);
        }
        assert_eq!(targets[0].health.current, 75.0);
        assert!(system.bullets().is_empty());
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::TargetHit { kind: WeaponKind::NoseGun, .. })));
    }

    #[test]
    fn nose_gun_has_its_own_faster_cadence() {
        let (mut system, clock) = system();
        let mut events = Vec::new();

        assert!(system.fire_nose_gun(Vec3::ZERO, -Vec3::Z, &mut events));
        assert!(!system.fire_nose_gun(Vec3::ZERO, -Vec3::Z, &mut events));
        // nose_fire_rate 10 => ready again after 0.1 s, while the wing guns
        // (rate 5) would still be cold.
        clock.advance(0.1);
        assert!(system.fire_nose_gun(Vec3::ZERO, -Vec3::Z, &mut events));
        assert_eq!(system.bullets().len(), 2);
    }

    #[test]
    fn expired_rounds_vanish_without_effect() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        let mut targets = vec![Dummy::at(Vec3::new(0.0, 500.0, 0.0))];

        system.fire_nose_gun(Vec3::ZERO, -Vec3::Z, &mut events);
        system.update(2.3, &mut targets, &mut events);
        assert!(system.bullets().is_empty());
        assert_eq!(targets[0].health.current, 100.0);
    }

    #[test]
    fn bomb_bay_rate_limits_to_one_per_second() {
        let (mut system, clock) = system();
        let mut events = Vec::new();

        assert!(system.drop_bomb(Vec3::new(0.0, 6000.0, 0.0), Vec3::ZERO, &mut events));
        assert!(!system.drop_bomb(Vec3::new(0.0, 6000.0, 0.0), Vec3::ZERO, &mut events));
        clock.advance(0.5);
        assert!(!system.drop_bomb(Vec3::new(0.0, 6000.0, 0.0), Vec3::ZERO, &mut events));
        clock.advance(0.5);
        assert!(system.drop_bomb(Vec3::new(0.0, 6000.0, 0.0), Vec3::ZERO, &mut events));
        assert_eq!(system.bombs().len(), 2);
    }

    #[test]
    fn blast_damages_at_radius_but_not_beyond() {
        let center = Vec3::new(0.0, 5000.0, 0.0);
        let bomb = Bomb::new(center, Vec3::ZERO);
        let mut events = Vec::new();
        let mut targets = vec![
            Dummy::at(center + Vec3::new(BOMB_EXPLOSION_RADIUS, 0.0, 0.0)),
            Dummy::at(center + Vec3::new(BOMB_EXPLOSION_RADIUS + 0.001, 0.0, 0.0)),
        ];

        WeaponSystem::resolve_blast(&bomb, &mut targets, &mut events);
        assert_eq!(targets[0].health.current, 0.0);
        assert_eq!(targets[1].health.current, 100.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::BombExploded { .. })));
    }

    #[test]
    fn dropped_bomb_falls_and_levels_the_area() {
        let (mut system, _clock) = system();
        let mut events = Vec::new();
        // Target parked just above the deck; bomb released 60 units up.
        let mut targets = vec![Dummy::at(Vec3::new(0.0, 5001.0, 0.0))];
        system.drop_bomb(Vec3::new(0.0, 5060.0, 0.0), Vec3::ZERO, &mut events);

        for _ in 0..(6 * 240) {
            system.update(1.0 / 240.0, &mut targets, &mut events);
        }
        assert!(system.bombs().is_empty());
        assert!(!targets[0].is_alive());
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::TargetDestroyed { kind: WeaponKind::Bomb, .. })));
    }

    #[test]
    fn heat_rises_per_volley_and_decays_over_time() {
        let (mut system, clock) = system();
        let mut targets: Vec<Dummy> = Vec::new();
        let mut events = Vec::new();

        system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events);
        assert!((system.heat_level() - 0.15).abs() < 1e-6);

        system.update(0.2, &mut targets, &mut events);
        assert!((system.heat_level() - 0.07).abs() < 1e-6);
        system.update(0.2, &mut targets, &mut events);
        assert_eq!(system.heat_level(), 0.0);

        // Sustained fire caps at 1.0.
        for _ in 0..10 {
            clock.advance(0.25);
            system.fire_wing_guns(&forward_muzzles(), &mut targets, &mut events);
        }
        assert_eq!(system.heat_level(), 1.0);
    }
}

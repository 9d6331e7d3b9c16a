//! Session orchestration: owns the planet, the player, the weapon system,
//! and the tank fleet, and drives them through one fixed-order tick. No
//! globals; collaborators read the per-tick [`FrameState`] snapshot.

use std::sync::Arc;

use procgen::PlanetTerrain;
use rand::prelude::*;
use sim_core::{Clock, Transform};

use crate::bomb::Bomb;
use crate::config::{ConfigError, SimConfig};
use crate::events::{CombatEvent, WeaponKind};
use crate::input::FlightInput;
use crate::player::Player;
use crate::tank::Tank;
use crate::weapons::{Bullet, Target, WeaponSystem};

/// Steepest ground, measured against world up, a tank may spawn on.
const SPAWN_MAX_SLOPE_DEG: f32 = 30.0;
/// Surface samples tried per spawn request before giving up for the tick.
const SPAWN_ATTEMPTS: u32 = 64;
/// Wing-gun rays converge on a point this far ahead of the aircraft.
const WING_CONVERGENCE_RANGE: f32 = 300.0;

/// One flight-combat session over a single planet.
pub struct Session {
    config: SimConfig,
    planet: PlanetTerrain,
    player: Player,
    weapons: WeaponSystem,
    tanks: Vec<Tank>,
    rng: StdRng,
    events: Vec<CombatEvent>,
    gun_kills: u32,
    bomb_kills: u32,
}

/// Plain-data snapshot of one tick, read by rendering and score displays.
/// Tank transforms cover live tanks only; wreck positions arrive through
/// the destruction events.
pub struct FrameState<'a> {
    pub player: Transform,
    pub speed: f32,
    pub altitude: f32,
    pub health: f32,
    pub heat_level: f32,
    pub gun_kills: u32,
    pub bomb_kills: u32,
    pub tanks: Vec<Transform>,
    pub bullets: &'a [Bullet],
    pub bombs: &'a [Bomb],
    pub events: &'a [CombatEvent],
}

impl Session {
    /// Validate the configuration and deploy the initial fleet. The only
    /// fatal path in the whole simulation; per-tick calls never fail.
    pub fn new(config: SimConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let planet = PlanetTerrain::new(config.planet.radius, config.planet.seed);
        let player = Player::new(&config.player, config.planet.radius);
        let weapons = WeaponSystem::new(&config.weapons, config.planet.radius, clock);
        let rng = StdRng::seed_from_u64(config.planet.seed.wrapping_add(1));

        let mut session = Self {
            config,
            planet,
            player,
            weapons,
            tanks: Vec::new(),
            rng,
            events: Vec::new(),
            gun_kills: 0,
            bomb_kills: 0,
        };
        for _ in 0..session.config.tanks.fleet_size {
            if let Some(tank) = session.try_spawn_tank() {
                session.tanks.push(tank);
            }
        }
        log::info!("session ready: {} tanks deployed", session.tanks.len());
        Ok(session)
    }

    /// Advance the whole simulation by one tick:
    /// player flight, then firing requests, then in-flight ordnance, then
    /// tank patrols, then fleet bookkeeping. Returns the tick's events;
    /// scoring over them is the caller's business, the session only counts
    /// kills.
    pub fn update(&mut self, dt: f32, input: &FlightInput) -> &[CombatEvent] {
        self.events.clear();

        self.player.update(dt, input);

        if input.fire {
            let aim = self.player.position + self.player.forward_dir() * WING_CONVERGENCE_RANGE;
            let [left, right] = self.player.gun_mount_positions();
            let muzzles = [(left, aim - left), (right, aim - right)];
            self.weapons
                .fire_wing_guns(&muzzles, &mut self.tanks, &mut self.events);
            let nose = self.player.nose_mount_position();
            self.weapons
                .fire_nose_gun(nose, self.player.forward_dir(), &mut self.events);
        }
        if input.bomb {
            self.weapons.drop_bomb(
                self.player.bomb_bay_position(),
                self.player.velocity,
                &mut self.events,
            );
        }

        self.weapons.update(dt, &mut self.tanks, &mut self.events);

        for tank in &mut self.tanks {
            tank.update(dt, &self.planet, &mut self.rng);
        }

        for event in &self.events {
            if let CombatEvent::TargetDestroyed { kind, .. } = event {
                match kind {
                    WeaponKind::Bomb => self.bomb_kills += 1,
                    WeaponKind::WingGuns | WeaponKind::NoseGun => self.gun_kills += 1,
                }
            }
        }

        self.tanks.retain(|tank| tank.is_alive());
        if self.tanks.len() < self.config.tanks.fleet_floor {
            if let Some(tank) = self.try_spawn_tank() {
                self.tanks.push(tank);
            }
        }

        &self.events
    }

    /// Sample the surface for a spot that is level enough and keeps its
    /// distance from the aircraft. `None` when the planet refuses to
    /// cooperate this tick; the next tick tries again.
    fn try_spawn_tank(&mut self) -> Option<Tank> {
        for _ in 0..SPAWN_ATTEMPTS {
            let candidate = self.planet.random_surface_point();
            if !self.planet.is_valid_spawn(candidate, SPAWN_MAX_SLOPE_DEG) {
                continue;
            }
            if candidate.distance(self.player.position) < self.config.tanks.spawn_spacing {
                continue;
            }
            return Some(Tank::new(
                candidate,
                self.config.tanks.hp,
                &self.planet,
                &mut self.rng,
            ));
        }
        log::warn!("no valid tank spawn found after {SPAWN_ATTEMPTS} attempts");
        None
    }

    pub fn frame_state(&self) -> FrameState<'_> {
        FrameState {
            player: Transform::from_position_rotation(self.player.position, self.player.orientation),
            speed: self.player.speed(),
            altitude: self.player.altitude(),
            health: self.player.health().current,
            heat_level: self.weapons.heat_level(),
            gun_kills: self.gun_kills,
            bomb_kills: self.bomb_kills,
            tanks: self
                .tanks
                .iter()
                .map(|tank| Transform::from_position_rotation(tank.position, tank.facing))
                .collect(),
            bullets: self.weapons.bullets(),
            bombs: self.weapons.bombs(),
            events: &self.events,
        }
    }

    /// Put the aircraft back on its spawn point with full health. The
    /// fleet, kill counts, and in-flight ordnance are untouched.
    pub fn reset_player(&mut self) {
        self.player.reset();
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn planet(&self) -> &PlanetTerrain {
        &self.planet
    }

    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    pub fn gun_kills(&self) -> u32 {
        self.gun_kills
    }

    pub fn bomb_kills(&self) -> u32 {
        self.bomb_kills
    }
}

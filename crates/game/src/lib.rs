//! Flight-combat simulation over a procedural planet.
//!
//! This crate is the headless core: player flight integration, weapon
//! timing and hit resolution, projectile ballistics, and the tank fleet
//! lifecycle. Rendering, input capture, and UI are external collaborators
//! that feed [`FlightInput`] in and read [`FrameState`] out.

pub mod bomb;
pub mod config;
pub mod events;
pub mod input;
pub mod player;
pub mod session;
pub mod tank;
pub mod weapons;

pub use bomb::Bomb;
pub use config::{ConfigError, SimConfig};
pub use events::{CombatEvent, WeaponKind};
pub use input::FlightInput;
pub use player::Player;
pub use session::{FrameState, Session};
pub use tank::{Tank, TankState};
pub use weapons::{Bullet, ShotOutcome, Target, WeaponSystem};

//! skyraid - headless flight-combat sortie over a procedural planet.
//!
//! Drives the session with a scripted control schedule at a fixed 60 Hz
//! step and reports kills and score at the end. Weapon timing runs off a
//! manual clock advanced in lockstep with the simulation, so the sortie
//! plays out identically regardless of host speed.

use std::sync::Arc;

use anyhow::Result;
use game::{CombatEvent, FlightInput, Session, SimConfig, WeaponKind};
use sim_core::ManualClock;

/// Fixed demo timestep.
const DT: f32 = 1.0 / 60.0;
/// Sortie length in seconds.
const SORTIE_SECONDS: u32 = 90;
/// Scoring policy: the simulation reports kills, the driver prices them.
const GUN_KILL_POINTS: u32 = 100;
const BOMB_KILL_POINTS: u32 = 150;

/// Scripted stick-and-throttle schedule, repeating every 30 seconds:
/// climb out, then a weaving gun run, then a yawing level pass with bombs.
fn scripted_input(t: f32) -> FlightInput {
    let phase = t % 30.0;
    let (pitch, yaw) = if phase < 10.0 {
        (0.25, 0.0)
    } else if phase < 20.0 {
        (-0.15, (t * 0.2).sin() * 0.6)
    } else {
        (0.0, 0.4)
    };
    FlightInput {
        pitch,
        yaw,
        throttle: 1.0,
        fire: (10.0..20.0).contains(&phase),
        bomb: phase >= 20.0,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("skyraid - planetary strike sortie (headless)");

    let config = SimConfig::load()?;
    let clock = ManualClock::new();
    let mut session = Session::new(config, Arc::new(clock.clone()))?;

    log::info!("sortie start: {SORTIE_SECONDS}s at {:.0} Hz", 1.0 / DT);

    let mut score: u32 = 0;
    for tick in 0..SORTIE_SECONDS * 60 {
        let t = tick as f32 * DT;
        for event in session.update(DT, &scripted_input(t)) {
            if let CombatEvent::TargetDestroyed { kind, .. } = event {
                score += match kind {
                    WeaponKind::Bomb => BOMB_KILL_POINTS,
                    WeaponKind::WingGuns | WeaponKind::NoseGun => GUN_KILL_POINTS,
                };
            }
        }
        clock.advance(DT as f64);

        if tick % 600 == 0 {
            let frame = session.frame_state();
            log::info!(
                "t={t:5.1}s alt={:7.1} speed={:5.1} tanks={:2} heat={:.2} score={score}",
                frame.altitude,
                frame.speed,
                frame.tanks.len(),
                frame.heat_level,
            );
        }
    }

    let frame = session.frame_state();
    log::info!(
        "sortie complete: score {score} ({} gun kills, {} bomb kills)",
        frame.gun_kills,
        frame.bomb_kills,
    );
    Ok(())
}

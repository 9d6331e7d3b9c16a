//! Per-tick control record handed to the session by the input collaborator.

use std::f32::consts::FRAC_PI_2;

/// Control state for one simulation tick. The simulation never reads raw
/// devices; whoever owns the windowing layer translates events into this.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightInput {
    /// Nose attitude in radians, positive pitches up.
    pub pitch: f32,
    /// Heading in radians about world up.
    pub yaw: f32,
    /// Thrust fraction in [0, 1].
    pub throttle: f32,
    /// Gun trigger held.
    pub fire: bool,
    /// Bomb release requested.
    pub bomb: bool,
}

impl FlightInput {
    /// Clamp fields to their contract ranges: pitch to a straight vertical
    /// climb/dive, throttle to [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            pitch: self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
            throttle: self.throttle.clamp(0.0, 1.0),
            ..self
        }
    }
}

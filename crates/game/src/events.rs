//! Discrete combat events for external scoring and visual-effect layers.

use glam::Vec3;

/// Which weapon caused an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    WingGuns,
    NoseGun,
    Bomb,
}

/// Plain-data event emitted during a tick. `Session::update` returns the
/// tick's batch and the frame snapshot carries the same slice; the
/// simulation keeps no subscriber list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatEvent {
    /// A weapon discharged (muzzle flash / tracer hook for renderers).
    WeaponFired { kind: WeaponKind, origin: Vec3 },
    /// A target took damage without being destroyed.
    TargetHit { position: Vec3, kind: WeaponKind },
    /// A target was destroyed. Emitted exactly once per target, on the
    /// transition.
    TargetDestroyed { position: Vec3, kind: WeaponKind },
    /// A bomb went off at this position.
    BombExploded { position: Vec3, radius: f32 },
}

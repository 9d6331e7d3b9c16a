//! Deterministic geometry queries for weapon hit detection.
//!
//! Everything here is exact, allocation-free math over plain values; the
//! simulation resolves hits against a transient target list each tick, so
//! there is no retained world to keep in sync.

pub mod aabb;
pub mod raycast;

pub use aabb::*;
pub use raycast::*;

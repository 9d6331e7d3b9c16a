//! Core simulation types for Skyraid.
//!
//! This crate provides the foundational types used across all simulation
//! systems:
//! - Transform and GPU-ready instance data
//! - Injectable clocks for rate limiting
//! - Health and lifetime bookkeeping

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec3};

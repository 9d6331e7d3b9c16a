//! Procedural planet surface for the combat session.

pub mod planet;

pub use planet::*;

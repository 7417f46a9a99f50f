//! Collision detection for Skystrike: sphere-vs-box tests against the static city
//! and point-radius hit tests between projectiles and aircraft.
//!
//! There is no continuous collision detection; anything that moves farther than
//! its radius in one step can pass through thin geometry.

pub mod city;
pub mod collision;

pub use city::*;
pub use collision::*;

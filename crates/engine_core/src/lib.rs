//! Core engine types and utilities for Skystrike.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and axis-aligned bounds
//! - Time management (frame clock and fixed-step accumulator)
//! - Small shared components such as [`Lifetime`]

pub mod bounds;
pub mod components;
pub mod time;
pub mod transform;

pub use bounds::*;
pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

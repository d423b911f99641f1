//! Big Ball - bounded-arena ball collision simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balls, reactions, surface, driver)
//! - `settings`: Run configuration (arena size, population, pacing)
//! - `error`: Precondition failures surfaced to callers

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Radius range for Regular and Repellent balls (end exclusive)
    pub const SMALL_RADIUS_MIN: u32 = 5;
    pub const SMALL_RADIUS_MAX: u32 = 15;
    /// Radius range for Monster balls (end exclusive)
    pub const MONSTER_RADIUS_MIN: u32 = 15;
    pub const MONSTER_RADIUS_MAX: u32 = 25;

    /// A ball shrunk below this radius collapses and leaves the surface
    pub const MIN_RADIUS: f32 = 0.01;

    /// Wall-clock pause between ticks in the native runner
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
}

/// Whether two circles overlap (tangent circles do not)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

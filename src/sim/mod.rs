//! Deterministic simulation module
//!
//! All ball behaviour lives here. This module must stay pure and deterministic:
//! - Discrete ticks only, no wall-clock time
//! - Seeded RNG only, one instance per setup
//! - Stable iteration order (insertion order of the live set)
//! - No rendering or platform dependencies

pub mod ball;
pub mod driver;
pub mod reaction;
pub mod spawn;
pub mod surface;

pub use ball::{Ball, BallId, BallKind, Rgb};
pub use driver::{RunOutcome, Simulation};
pub use reaction::{CollisionEvent, Reaction, Removal, combine_colors, react};
pub use spawn::{Population, populate};
pub use surface::{BallView, Surface};

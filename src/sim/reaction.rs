//! Collision reactions between ball variants
//!
//! Reactions are directional: for an overlapping pair the surface calls
//! `react(a, b)` and, separately, `react(b, a)`. The initiator's kind picks
//! the table row:
//!
//! | Initiator | Other     | Effect                                            |
//! |-----------|-----------|---------------------------------------------------|
//! | Regular   | Regular   | strictly larger one absorbs the other             |
//! | Regular   | Monster   | Monster grows by initiator radius, initiator dies |
//! | Regular   | Repellent | Repellent takes the colour, initiator reverses    |
//! | Monster   | Regular   | Monster grows by other radius, other dies         |
//! | Monster   | Repellent | same as above                                     |
//! | Monster   | Monster   | nothing                                           |
//! | Repellent | Regular   | initiator takes the colour, other reverses        |
//! | Repellent | Repellent | colours are swapped                               |
//! | Repellent | Monster   | initiator radius is halved                        |

use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId, BallKind, Rgb};

/// Which side of a reaction must leave the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Removal {
    #[default]
    None,
    Initiator,
    Other,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// A Regular ball absorbed a smaller Regular ball
    Absorbed {
        absorber: BallId,
        absorbed: BallId,
        radius: f32,
    },
    /// A Monster ate a Regular or Repellent ball
    Devoured {
        monster: BallId,
        victim: BallId,
        radius: f32,
    },
    /// A Repellent copied a Regular ball's colour and sent it back
    ColorTaken { repellent: BallId, regular: BallId },
    /// Two Repellents traded colours
    ColorsSwapped { a: BallId, b: BallId },
    /// A Repellent touching a Monster lost half its radius
    Halved { ball: BallId, radius: f32 },
    /// A ball shrank below the minimum radius and was removed
    Collapsed { ball: BallId },
}

/// Outcome of a single directional reaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reaction {
    pub removal: Removal,
    pub event: Option<CollisionEvent>,
}

impl Reaction {
    fn none() -> Self {
        Self::default()
    }

    fn with(removal: Removal, event: CollisionEvent) -> Self {
        Self {
            removal,
            event: Some(event),
        }
    }
}

/// Apply the initiator's reaction to a collision with `other`
pub fn react(initiator: &mut Ball, other: &mut Ball) -> Reaction {
    use BallKind::*;

    match (initiator.kind, other.kind) {
        (Regular, Regular) => {
            if initiator.radius > other.radius {
                initiator.color =
                    combine_colors(initiator.color, initiator.radius, other.color, other.radius);
                initiator.radius += other.radius;
                Reaction::with(
                    Removal::Other,
                    CollisionEvent::Absorbed {
                        absorber: initiator.id,
                        absorbed: other.id,
                        radius: initiator.radius,
                    },
                )
            } else {
                // The larger ball absorbs from its own reaction; ties do nothing
                Reaction::none()
            }
        }
        (Regular, Monster) => {
            other.radius += initiator.radius;
            Reaction::with(
                Removal::Initiator,
                CollisionEvent::Devoured {
                    monster: other.id,
                    victim: initiator.id,
                    radius: other.radius,
                },
            )
        }
        (Regular, Repellent) => {
            other.color = initiator.color;
            initiator.reverse();
            Reaction::with(
                Removal::None,
                CollisionEvent::ColorTaken {
                    repellent: other.id,
                    regular: initiator.id,
                },
            )
        }
        (Monster, Regular | Repellent) => {
            initiator.radius += other.radius;
            Reaction::with(
                Removal::Other,
                CollisionEvent::Devoured {
                    monster: initiator.id,
                    victim: other.id,
                    radius: initiator.radius,
                },
            )
        }
        (Monster, Monster) => Reaction::none(),
        (Repellent, Regular) => {
            initiator.color = other.color;
            other.reverse();
            Reaction::with(
                Removal::None,
                CollisionEvent::ColorTaken {
                    repellent: initiator.id,
                    regular: other.id,
                },
            )
        }
        (Repellent, Repellent) => {
            std::mem::swap(&mut initiator.color, &mut other.color);
            Reaction::with(
                Removal::None,
                CollisionEvent::ColorsSwapped {
                    a: initiator.id,
                    b: other.id,
                },
            )
        }
        (Repellent, Monster) => {
            initiator.radius /= 2.0;
            Reaction::with(
                Removal::None,
                CollisionEvent::Halved {
                    ball: initiator.id,
                    radius: initiator.radius,
                },
            )
        }
    }
}

/// Radius-weighted colour average, floored per channel
///
/// `r1` and `r2` are the radii before absorption.
pub fn combine_colors(c1: Rgb, r1: f32, c2: Rgb, r2: f32) -> Rgb {
    let total = r1 + r2;
    let mix = |a: u8, b: u8| -> u8 {
        let value = (a as f32 * r1 + b as f32 * r2) / total;
        value.floor().clamp(0.0, 255.0) as u8
    };
    Rgb::new(mix(c1.r, c2.r), mix(c1.g, c2.g), mix(c1.b, c2.b))
}

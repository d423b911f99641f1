//! Ball entities and their variants

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Stable identity of a ball within a surface
pub type BallId = u32;

/// Ball variant - selects the reaction table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    /// Absorbs smaller Regular balls, loses to Monsters
    Regular,
    /// Stationary, devours everything but other Monsters
    Monster,
    /// Bounces Regular balls away and trades colours
    Repellent,
}

impl BallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallKind::Regular => "Regular",
            BallKind::Monster => "Monster",
            BallKind::Repellent => "Repellent",
        }
    }
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A ball entity
///
/// Equality between balls is by `id`; two balls may transiently share
/// radius, colour and position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub kind: BallKind,
    /// Centre of the ball
    pub pos: Vec2,
    /// Per-tick displacement (not normalized)
    pub dir: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

impl Ball {
    /// Create a ball, rejecting non-positive or non-finite radii.
    ///
    /// The id is provisional; `Surface::add` assigns the real one.
    pub fn new(kind: BallKind, radius: f32, pos: Vec2, color: Rgb, dir: Vec2) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidRadius(radius));
        }
        let dir = match kind {
            BallKind::Monster => Vec2::ZERO,
            _ => dir,
        };
        Ok(Self {
            id: 0,
            kind,
            pos,
            dir,
            radius,
            color,
        })
    }

    pub fn regular(radius: f32, pos: Vec2, color: Rgb, dir: Vec2) -> Result<Self> {
        Self::new(BallKind::Regular, radius, pos, color, dir)
    }

    /// Monsters never move
    pub fn monster(radius: f32, pos: Vec2, color: Rgb) -> Result<Self> {
        Self::new(BallKind::Monster, radius, pos, color, Vec2::ZERO)
    }

    pub fn repellent(radius: f32, pos: Vec2, color: Rgb, dir: Vec2) -> Result<Self> {
        Self::new(BallKind::Repellent, radius, pos, color, dir)
    }

    #[inline]
    pub fn is_regular(&self) -> bool {
        self.kind == BallKind::Regular
    }

    /// Whether this ball's circle overlaps another's
    #[inline]
    pub fn overlaps(&self, other: &Ball) -> bool {
        crate::circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    /// Reverse travel on both axes
    pub fn reverse(&mut self) {
        self.dir = -self.dir;
    }
}

impl PartialEq for Ball {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ball {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_radius() {
        let color = Rgb::new(1, 2, 3);
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = Ball::regular(radius, Vec2::ZERO, color, Vec2::ONE);
            assert!(matches!(result, Err(SimError::InvalidRadius(_))));
        }
    }

    #[test]
    fn test_monster_is_stationary() {
        let ball = Ball::new(
            BallKind::Monster,
            20.0,
            Vec2::new(5.0, 5.0),
            Rgb::default(),
            Vec2::new(0.5, -0.5),
        )
        .unwrap();
        assert_eq!(ball.dir, Vec2::ZERO);
    }

    #[test]
    fn test_equality_is_by_id() {
        let mut a = Ball::regular(10.0, Vec2::ZERO, Rgb::default(), Vec2::ZERO).unwrap();
        let mut b = a.clone();
        a.id = 1;
        b.id = 2;
        assert_ne!(a, b);

        b.id = 1;
        b.radius = 3.0;
        assert_eq!(a, b);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Ball::regular(5.0, Vec2::new(0.0, 0.0), Rgb::default(), Vec2::ZERO).unwrap();
        let b = Ball::regular(5.0, Vec2::new(10.0, 0.0), Rgb::default(), Vec2::ZERO).unwrap();
        assert!(!a.overlaps(&b), "tangent balls do not collide");

        let c = Ball::regular(5.0, Vec2::new(9.9, 0.0), Rgb::default(), Vec2::ZERO).unwrap();
        assert!(a.overlaps(&c));

        let d = Ball::regular(5.0, Vec2::new(0.0, 0.0), Rgb::default(), Vec2::ZERO).unwrap();
        assert!(a.overlaps(&d), "concentric balls collide");
    }
}

//! Initial population setup
//!
//! Every draw comes from the single RNG passed in, so a seed fully
//! determines the starting layout.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallKind, Rgb};
use super::surface::Surface;
use crate::consts::*;
use crate::error::Result;

/// How many balls of each kind to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Population {
    pub regular: usize,
    pub monster: usize,
    pub repellent: usize,
}

impl Population {
    pub fn new(regular: usize, monster: usize, repellent: usize) -> Self {
        Self {
            regular,
            monster,
            repellent,
        }
    }

    pub fn total(&self) -> usize {
        self.regular + self.monster + self.repellent
    }
}

/// Fill the surface: Regular balls first, then Monsters, then Repellents
pub fn populate<R: Rng + ?Sized>(
    surface: &mut Surface,
    population: &Population,
    rng: &mut R,
) -> Result<()> {
    let groups = [
        (BallKind::Regular, population.regular),
        (BallKind::Monster, population.monster),
        (BallKind::Repellent, population.repellent),
    ];
    for (kind, count) in groups {
        for _ in 0..count {
            let ball = random_ball(kind, surface.width(), surface.height(), rng)?;
            surface.add(ball)?;
        }
    }
    log::debug!(
        "Spawned {} balls ({} regular, {} monster, {} repellent)",
        population.total(),
        population.regular,
        population.monster,
        population.repellent
    );
    Ok(())
}

/// Build one ball of `kind` with random radius, position, colour and direction
pub fn random_ball<R: Rng + ?Sized>(
    kind: BallKind,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Result<Ball> {
    let (min, max) = match kind {
        BallKind::Monster => (MONSTER_RADIUS_MIN, MONSTER_RADIUS_MAX),
        BallKind::Regular | BallKind::Repellent => (SMALL_RADIUS_MIN, SMALL_RADIUS_MAX),
    };
    let radius = rng.random_range(min..max) as f32;
    let pos = random_position(width, height, rng);
    let color = random_color(rng);
    let dir = random_direction(rng);
    Ball::new(kind, radius, pos, color, dir)
}

/// Whole-unit position in `[0, width) x [0, height)`
pub fn random_position<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..width).floor(),
        rng.random_range(0.0..height).floor(),
    )
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(rng.random(), rng.random(), rng.random())
}

/// Each component in `[-1, 1)`
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
}

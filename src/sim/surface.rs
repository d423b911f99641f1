//! Bounded rectangular arena owning the live balls
//!
//! A tick runs in three phases:
//! 1. Motion: every ball advances by its direction and reflects off walls
//! 2. Collision: every ordered overlapping pair `(a, b)` dispatches `react(a, b)`
//! 3. Compaction: balls marked dead during phase 2 are dropped
//!
//! Removal is visible immediately: once a ball is marked dead it neither
//! initiates nor receives any further reaction in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId, BallKind, Rgb};
use super::reaction::{CollisionEvent, Removal, react};
use crate::consts::MIN_RADIUS;
use crate::error::{Result, SimError};

/// Read-only view of a ball for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: BallId,
    pub kind: BallKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            kind: ball.kind,
            pos: ball.pos,
            radius: ball.radius,
            color: ball.color,
        }
    }
}

/// The arena
#[derive(Debug, Clone)]
pub struct Surface {
    width: f32,
    height: f32,
    /// Live balls, in insertion order
    balls: Vec<Ball>,
    /// Parallel to `balls`; only ever set while a step is in progress
    dead: Vec<bool>,
    next_id: BallId,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            balls: Vec::new(),
            dead: Vec::new(),
            next_id: 1,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Add a ball and return the id it was assigned
    pub fn add(&mut self, mut ball: Ball) -> Result<BallId> {
        if !ball.radius.is_finite() || ball.radius <= 0.0 {
            return Err(SimError::InvalidRadius(ball.radius));
        }
        let id = self.next_id;
        self.next_id += 1;
        ball.id = id;
        self.balls.push(ball);
        self.dead.push(false);
        Ok(id)
    }

    /// Remove a ball by id. Returns false if it was not present.
    pub fn remove(&mut self, id: BallId) -> bool {
        let Some(index) = self.balls.iter().position(|b| b.id == id) else {
            return false;
        };
        self.balls.remove(index);
        self.dead.remove(index);
        true
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    /// Live balls
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn count(&self, kind: BallKind) -> usize {
        self.balls.iter().filter(|b| b.kind == kind).count()
    }

    /// Whether any Regular ball is still alive
    pub fn has_regular(&self) -> bool {
        self.balls.iter().any(Ball::is_regular)
    }

    /// Render-facing copy of the live set
    pub fn snapshot(&self) -> Vec<BallView> {
        self.balls.iter().map(BallView::from).collect()
    }

    /// Advance one tick and return what happened, in dispatch order
    pub fn step(&mut self) -> Vec<CollisionEvent> {
        let (width, height) = (self.width, self.height);
        for ball in &mut self.balls {
            advance(ball, width, height);
        }

        let events = self.resolve_collisions();
        self.compact();
        events
    }

    fn resolve_collisions(&mut self) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        let n = self.balls.len();

        for i in 0..n {
            for j in 0..n {
                // The initiator may die partway through its own scan
                if self.dead[i] {
                    break;
                }
                if i == j || self.dead[j] {
                    continue;
                }

                let (a, b) = pair_mut(&mut self.balls, i, j);
                if !a.overlaps(b) {
                    continue;
                }

                let reaction = react(a, b);
                events.extend(reaction.event);
                match reaction.removal {
                    Removal::None => {}
                    Removal::Initiator => self.dead[i] = true,
                    Removal::Other => self.dead[j] = true,
                }

                if !self.dead[i] && a.radius < MIN_RADIUS {
                    self.dead[i] = true;
                    events.push(CollisionEvent::Collapsed { ball: a.id });
                }
            }
        }

        events
    }

    fn compact(&mut self) {
        if !self.dead.contains(&true) {
            return;
        }
        let mut dead = std::mem::take(&mut self.dead).into_iter();
        self.balls.retain(|_| !dead.next().unwrap_or(false));
        self.dead = vec![false; self.balls.len()];
    }
}

/// Move a ball one step and reflect it back inside `[0, width] x [0, height]`
fn advance(ball: &mut Ball, width: f32, height: f32) {
    ball.pos += ball.dir;

    let (x, dir_x) = contain_axis(ball.pos.x, ball.dir.x, ball.radius, width);
    let (y, dir_y) = contain_axis(ball.pos.y, ball.dir.y, ball.radius, height);
    ball.pos = Vec2::new(x, y);
    ball.dir = Vec2::new(dir_x, dir_y);
}

/// Reflect along one axis if the circle crosses either bound.
///
/// The centre is pulled back so the circle fits; a ball wider than the
/// arena is centred instead.
fn contain_axis(pos: f32, dir: f32, radius: f32, extent: f32) -> (f32, f32) {
    if pos - radius >= 0.0 && pos + radius <= extent {
        return (pos, dir);
    }
    let pos = if 2.0 * radius >= extent {
        extent / 2.0
    } else {
        pos.clamp(radius, extent - radius)
    };
    (pos, -dir)
}

/// Borrow two distinct balls mutably
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = balls.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = balls.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn surface() -> Surface {
        Surface::new(200.0, 100.0).unwrap()
    }

    fn regular(radius: f32, x: f32, y: f32, color: Rgb) -> Ball {
        Ball::regular(radius, Vec2::new(x, y), color, Vec2::ZERO).unwrap()
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Surface::new(0.0, 10.0).is_err());
        assert!(Surface::new(10.0, -1.0).is_err());
        assert!(Surface::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut s = surface();
        let a = s.add(regular(5.0, 20.0, 20.0, Rgb::default())).unwrap();
        let b = s.add(regular(5.0, 20.0, 20.0, Rgb::default())).unwrap();
        assert_ne!(a, b);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_add_rejects_tampered_radius() {
        let mut s = surface();
        let mut ball = regular(5.0, 20.0, 20.0, Rgb::default());
        ball.radius = 0.0;
        assert!(matches!(s.add(ball), Err(SimError::InvalidRadius(_))));
        assert!(s.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut s = surface();
        let id = s.add(regular(5.0, 20.0, 20.0, Rgb::default())).unwrap();
        assert!(s.remove(id));
        assert!(!s.remove(id));
        assert!(!s.remove(999));
        assert!(s.is_empty());
    }

    #[test]
    fn test_motion_and_wall_reflection() {
        let mut s = surface();
        let id = s
            .add(Ball::regular(5.0, Vec2::new(194.5, 50.0), Rgb::default(), Vec2::new(1.0, 0.5)).unwrap())
            .unwrap();

        s.step();
        let ball = s.get(id).unwrap();
        assert_eq!(ball.pos, Vec2::new(195.0, 50.5));
        assert_eq!(ball.dir, Vec2::new(-1.0, 0.5));
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let mut s = surface();
        let id = s
            .add(Ball::regular(5.0, Vec2::new(5.5, 5.5), Rgb::default(), Vec2::new(-1.0, -1.0)).unwrap())
            .unwrap();

        s.step();
        let ball = s.get(id).unwrap();
        assert_eq!(ball.dir, Vec2::new(1.0, 1.0));
        assert_eq!(ball.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_ball_wider_than_arena_is_centred() {
        let mut s = Surface::new(30.0, 100.0).unwrap();
        let id = s.add(Ball::monster(20.0, Vec2::new(3.0, 50.0), Rgb::default()).unwrap()).unwrap();
        s.step();
        assert_eq!(s.get(id).unwrap().pos, Vec2::new(15.0, 50.0));
    }

    #[test]
    fn test_regular_absorption_through_step() {
        let mut s = surface();
        let a = s.add(regular(10.0, 50.0, 50.0, Rgb::new(200, 0, 0))).unwrap();
        let b = s.add(regular(4.0, 58.0, 50.0, Rgb::new(0, 100, 50))).unwrap();

        let events = s.step();
        assert_eq!(s.len(), 1);
        assert!(s.get(b).is_none());
        let ball = s.get(a).unwrap();
        assert_eq!(ball.radius, 14.0);
        assert_eq!(ball.color, Rgb::new(142, 28, 14));
        assert_eq!(
            events,
            vec![CollisionEvent::Absorbed {
                absorber: a,
                absorbed: b,
                radius: 14.0
            }]
        );
    }

    #[test]
    fn test_equal_regulars_do_not_merge() {
        let mut s = surface();
        s.add(regular(8.0, 50.0, 50.0, Rgb::new(1, 1, 1))).unwrap();
        s.add(regular(8.0, 55.0, 50.0, Rgb::new(2, 2, 2))).unwrap();

        let events = s.step();
        assert!(events.is_empty());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_monster_wins_regardless_of_order() {
        for monster_first in [true, false] {
            let mut s = surface();
            let monster = Ball::monster(20.0, Vec2::new(50.0, 50.0), Rgb::default()).unwrap();
            let victim = regular(12.0, 60.0, 50.0, Rgb::default());
            let (monster_id, victim_id) = if monster_first {
                let m = s.add(monster).unwrap();
                (m, s.add(victim).unwrap())
            } else {
                let v = s.add(victim).unwrap();
                (s.add(monster).unwrap(), v)
            };

            s.step();
            assert!(s.get(victim_id).is_none());
            assert_eq!(s.get(monster_id).unwrap().radius, 32.0);
            assert!(!s.has_regular());
        }
    }

    #[test]
    fn test_removed_ball_does_not_react_again() {
        // A: Monster, B: Regular touching A, C: Regular touching only B
        let mut s = surface();
        let a = s.add(Ball::monster(20.0, Vec2::new(40.0, 50.0), Rgb::default()).unwrap()).unwrap();
        let b = s.add(regular(10.0, 65.0, 50.0, Rgb::new(10, 10, 10))).unwrap();
        let c = s.add(regular(5.0, 78.0, 50.0, Rgb::new(250, 250, 250))).unwrap();

        let events = s.step();
        assert!(s.get(b).is_none());
        assert_eq!(s.get(a).unwrap().radius, 30.0);

        let c_ball = s.get(c).unwrap();
        assert_eq!(c_ball.color, Rgb::new(250, 250, 250));
        assert_eq!(c_ball.radius, 5.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_repellent_pair_swaps_twice_per_tick() {
        let mut s = surface();
        let a = s
            .add(Ball::repellent(8.0, Vec2::new(50.0, 50.0), Rgb::new(1, 2, 3), Vec2::ZERO).unwrap())
            .unwrap();
        let b = s
            .add(Ball::repellent(8.0, Vec2::new(55.0, 50.0), Rgb::new(4, 5, 6), Vec2::ZERO).unwrap())
            .unwrap();

        for _ in 0..2 {
            let events = s.step();
            assert_eq!(events.len(), 2);
            assert_eq!(s.get(a).unwrap().color, Rgb::new(1, 2, 3));
            assert_eq!(s.get(b).unwrap().color, Rgb::new(4, 5, 6));
        }
    }

    #[test]
    fn test_regular_repellent_bounce_cancels_within_tick() {
        let mut s = surface();
        let reg = s
            .add(Ball::regular(6.0, Vec2::new(50.0, 50.0), Rgb::new(9, 8, 7), Vec2::new(0.5, 0.0)).unwrap())
            .unwrap();
        let rep = s
            .add(Ball::repellent(6.0, Vec2::new(60.0, 50.0), Rgb::new(0, 0, 0), Vec2::ZERO).unwrap())
            .unwrap();

        s.step();
        assert_eq!(s.get(rep).unwrap().color, Rgb::new(9, 8, 7));
        // Reversed once by each directional reaction
        assert_eq!(s.get(reg).unwrap().dir, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_repellent_touching_monster() {
        // Repellent reacts first: halved, then eaten at its halved size
        let mut s = surface();
        let rep = s
            .add(Ball::repellent(10.0, Vec2::new(50.0, 50.0), Rgb::default(), Vec2::ZERO).unwrap())
            .unwrap();
        let monster = s.add(Ball::monster(20.0, Vec2::new(70.0, 50.0), Rgb::default()).unwrap()).unwrap();

        let events = s.step();
        assert!(s.get(rep).is_none());
        assert_eq!(s.get(monster).unwrap().radius, 25.0);
        assert!(matches!(events[0], CollisionEvent::Halved { radius, .. } if radius == 5.0));
    }

    #[test]
    fn test_shrinking_ball_collapses() {
        let mut s = surface();
        let rep = s
            .add(Ball::repellent(0.015, Vec2::new(50.0, 50.0), Rgb::default(), Vec2::ZERO).unwrap())
            .unwrap();
        // Add the monster second so the repellent reacts first
        s.add(Ball::monster(20.0, Vec2::new(60.0, 50.0), Rgb::default()).unwrap()).unwrap();

        let events = s.step();
        assert!(s.get(rep).is_none());
        assert!(events.contains(&CollisionEvent::Collapsed { ball: rep }));
        assert!(s.balls().iter().all(|b| b.radius > 0.0));
    }

    #[test]
    fn test_snapshot_reflects_live_set() {
        let mut s = surface();
        let id = s.add(regular(5.0, 20.0, 30.0, Rgb::new(7, 7, 7))).unwrap();
        let views = s.snapshot();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, id);
        assert_eq!(views[0].pos, Vec2::new(20.0, 30.0));
        assert_eq!(views[0].color, Rgb::new(7, 7, 7));
    }

    proptest! {
        #[test]
        fn prop_motion_keeps_ball_inside(
            x in 0.0f32..200.0,
            y in 0.0f32..100.0,
            dx in -1.0f32..1.0,
            dy in -1.0f32..1.0,
            radius in 5.0f32..25.0,
            ticks in 1usize..50,
        ) {
            let mut s = surface();
            let id = s
                .add(Ball::regular(radius, Vec2::new(x, y), Rgb::default(), Vec2::new(dx, dy)).unwrap())
                .unwrap();
            for _ in 0..ticks {
                s.step();
                let ball = s.get(id).unwrap();
                prop_assert!(ball.pos.x - ball.radius >= -1e-3);
                prop_assert!(ball.pos.x + ball.radius <= 200.0 + 1e-3);
                prop_assert!(ball.pos.y - ball.radius >= -1e-3);
                prop_assert!(ball.pos.y + ball.radius <= 100.0 + 1e-3);
            }
        }
    }
}

//! Simulation driver
//!
//! Owns a surface and steps it until no Regular ball is left. Wall-clock
//! pacing is left to the caller.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::reaction::CollisionEvent;
use super::spawn::populate;
use super::surface::Surface;
use crate::error::Result;
use crate::settings::Settings;

/// How a bounded run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every Regular ball is gone
    Finished { ticks: u64 },
    /// Regular balls remain but the tick budget ran out
    TickLimit { ticks: u64 },
}

/// A running simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    surface: Surface,
    /// Simulation tick counter
    ticks: u64,
}

impl Simulation {
    /// Build the arena and seed its population from `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut surface = Surface::new(settings.width, settings.height)?;
        populate(&mut surface, &settings.population, &mut rng)?;

        log::info!(
            "Simulation initialized with seed {}: {}x{} arena, {} balls",
            settings.seed,
            settings.width,
            settings.height,
            surface.len()
        );
        Ok(Self::from_surface(surface))
    }

    /// Wrap a hand-built surface
    pub fn from_surface(surface: Surface) -> Self {
        Self { surface, ticks: 0 }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once no Regular ball remains
    pub fn is_finished(&self) -> bool {
        !self.surface.has_regular()
    }

    /// Advance one tick
    pub fn step(&mut self) -> Vec<CollisionEvent> {
        let events = self.surface.step();
        self.ticks += 1;

        for event in &events {
            log::debug!("tick {}: {:?}", self.ticks, event);
        }
        log::trace!("tick {}: {} balls alive", self.ticks, self.surface.len());
        events
    }

    /// Step until finished or until the total tick count reaches `max_ticks`.
    ///
    /// `on_tick` sees the surface after every step.
    pub fn run<F>(&mut self, max_ticks: Option<u64>, mut on_tick: F) -> RunOutcome
    where
        F: FnMut(&Surface),
    {
        while !self.is_finished() {
            if max_ticks.is_some_and(|max| self.ticks >= max) {
                log::info!(
                    "Stopped at tick limit {} with {} balls alive",
                    self.ticks,
                    self.surface.len()
                );
                return RunOutcome::TickLimit { ticks: self.ticks };
            }
            self.step();
            on_tick(&self.surface);
        }

        log::info!("No regular balls left after {} ticks", self.ticks);
        RunOutcome::Finished { ticks: self.ticks }
    }
}

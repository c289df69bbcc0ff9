//! Simulation engine for running an invasion.

use crate::graph::WorldGraph;
use invasion_core::{AlienId, Destruction, Error, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Lifecycle of a simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    Idle,
    Deploying,
    Running,
    Stalemate,
    Completed,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every requested round was played
    Completed,
    /// A round produced no moves; no alien can ever move again
    Stalemate,
}

pub struct Simulator<R = ChaCha8Rng> {
    world: WorldGraph,
    rng: R,
    state: SimState,
    round: u64,
    total_moves: u64,
    destructions: Vec<Destruction>,
}

impl Simulator<ChaCha8Rng> {
    pub fn with_seed(world: WorldGraph, seed: u64) -> Self {
        Self::new(world, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulator<R> {
    pub fn new(world: WorldGraph, rng: R) -> Self {
        Self {
            world,
            rng,
            state: SimState::Idle,
            round: 0,
            total_moves: 0,
            destructions: Vec::new(),
        }
    }

    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    pub fn into_world(self) -> WorldGraph {
        self.world
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Rounds played so far
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn destructions(&self) -> &[Destruction] {
        &self.destructions
    }

    /// Place `n` aliens on `n` distinct cities chosen uniformly at random.
    /// Alien ids are `0..n` in placement order.
    #[instrument(skip(self))]
    pub fn deploy(&mut self, n: usize) -> Result<()> {
        if self.state != SimState::Idle {
            return Err(Error::InvalidState(format!(
                "cannot deploy from {:?}",
                self.state
            )));
        }

        if n > 0 && u32::try_from(n - 1).is_err() {
            return Err(Error::TooManyAliens(n));
        }

        let available = self.world.city_count();
        if n > available {
            return Err(Error::InsufficientCities {
                requested: n,
                available,
            });
        }

        self.state = SimState::Deploying;

        let chosen: Vec<String> = self
            .world
            .cities()
            .choose_multiple(&mut self.rng, n)
            .cloned()
            .collect();

        for (i, city) in chosen.iter().enumerate() {
            let id = AlienId(u32::try_from(i).map_err(|_| Error::TooManyAliens(n))?);
            self.world.deploy_alien(city, id)?;
            debug!(event = "alien_deployed", alien = %id, city = %city, "Alien {} landed in {}", id, city);
        }

        info!(event = "deployed", aliens = n, cities = available, "Deployed {} aliens", n);
        self.state = SimState::Running;
        Ok(())
    }

    /// Move at most one alien out of every city that existed at the start of
    /// the round. Returns the number of moves made.
    pub fn move_aliens_one_round(&mut self) -> Result<usize> {
        let snapshot: Vec<String> = self.world.cities().to_vec();
        let mut moves = 0;

        for city in &snapshot {
            if self.world.aliens(city)?.is_empty() {
                continue;
            }

            let target = match self.world.neighbors(city)?.choose(&mut self.rng) {
                Some(neighbor) => neighbor.to_string(),
                None => {
                    trace!(city = %city, "Aliens trapped");
                    continue;
                }
            };

            let alien = self.world.pop_alien(city)?;
            self.world.deploy_alien(&target, alien)?;
            debug!(
                event = "alien_moved",
                alien = %alien,
                from = %city,
                to = %target,
                "Alien {} moved from {} to {}",
                alien,
                city,
                target
            );
            moves += 1;
        }

        Ok(moves)
    }

    /// Destroy every city currently holding two or more aliens
    pub fn destroy_overwhelmed_cities(&mut self) -> Result<Vec<Destruction>> {
        let overwhelmed: Vec<String> = self
            .world
            .cities()
            .iter()
            .filter(|city| self.world.is_overwhelmed(city))
            .cloned()
            .collect();

        let mut destroyed = Vec::with_capacity(overwhelmed.len());
        for city in overwhelmed {
            let aliens = self.world.destroy_city(&city)?;
            let destruction = Destruction {
                round: self.round,
                city,
                aliens,
            };
            info!(
                event = "city_destroyed",
                round = self.round,
                city = %destruction.city,
                aliens = ?destruction.aliens,
                "💥 {}",
                destruction
            );
            destroyed.push(destruction);
        }

        Ok(destroyed)
    }

    /// Run up to `max_rounds` rounds of move-then-destroy.
    ///
    /// Stops early with [`Outcome::Stalemate`] after the first round in which
    /// no alien moved. Running without a prior `deploy` deploys no aliens.
    #[instrument(skip(self))]
    pub fn run(&mut self, max_rounds: u64) -> Result<SimulationReport> {
        match self.state {
            SimState::Idle => self.deploy(0)?,
            SimState::Running => {}
            state => {
                return Err(Error::InvalidState(format!("cannot run from {:?}", state)));
            }
        }

        info!(
            cities = self.world.city_count(),
            aliens = self.world.alien_count(),
            "Starting invasion for up to {} rounds",
            max_rounds
        );

        let mut outcome = Outcome::Completed;
        for _ in 0..max_rounds {
            self.round += 1;
            debug!(round = self.round, "Day {} of invasion", self.round);

            let moves = self.move_aliens_one_round()?;
            self.total_moves += moves as u64;

            let destroyed = self.destroy_overwhelmed_cities()?;
            self.destructions.extend(destroyed);

            if moves == 0 {
                info!(
                    event = "stalemate",
                    round = self.round,
                    "Stalemate. All aliens trapped"
                );
                outcome = Outcome::Stalemate;
                break;
            }
        }

        self.state = match outcome {
            Outcome::Completed => SimState::Completed,
            Outcome::Stalemate => SimState::Stalemate,
        };

        let report = self.report(outcome);
        info!(
            event = "invasion_summary",
            outcome = ?report.outcome,
            rounds = report.rounds,
            total_moves = report.total_moves,
            cities_destroyed = report.destructions.len(),
            surviving_cities = report.surviving_cities.len(),
            surviving_aliens = report.surviving_aliens,
            "🏁 Invasion over"
        );
        Ok(report)
    }

    fn report(&self, outcome: Outcome) -> SimulationReport {
        SimulationReport {
            outcome,
            rounds: self.round,
            total_moves: self.total_moves,
            destructions: self.destructions.clone(),
            surviving_cities: self.world.cities().to_vec(),
            surviving_aliens: self.world.alien_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub outcome: Outcome,
    pub rounds: u64,
    pub total_moves: u64,
    pub destructions: Vec<Destruction>,
    pub surviving_cities: Vec<String>,
    pub surviving_aliens: usize,
}

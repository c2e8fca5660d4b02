use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::agent::Agent;
use crate::components::Vector2;
use crate::config::{Params, Rgb, UpdateMode};
use crate::error::ConfigError;
use crate::neighborhood::Neighborhood;

/// A fixed population of agents sharing one parameter set and one seeded
/// random source.
pub struct Flock {
    agents: Vec<Agent>,
    params: Params,
    rng: StdRng,
    ticks: u64,
}

// Steering for agents[index] and whether it saw anyone at all.
fn steer<R: Rng + ?Sized>(agents: &[Agent], index: usize, params: &Params, rng: &mut R) -> (Vector2, bool) {
    let hood = Neighborhood::scan(agents, index, params, rng);
    (hood.steering(&agents[index], params, rng), hood.count > 0)
}

impl Flock {
    /// Random population inside the spawn region. Fails on invalid `params`.
    pub fn spawn(color: Rgb, size: usize, params: Params, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let agents = (0..size)
            .map(|_| Agent::spawn(color, &params, &mut rng))
            .collect();
        log::debug!("Spawned flock of {} ({:?}) with seed {}", size, color, seed);
        Ok(Self {
            agents,
            params,
            rng,
            ticks: 0,
        })
    }

    pub fn from_agents(agents: Vec<Agent>, params: Params, seed: u64) -> Self {
        Self {
            agents,
            params,
            rng: StdRng::seed_from_u64(seed),
            ticks: 0,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Raw neighbor sums for `agents[index]` against the current state.
    /// Random draws come from `rng`, never from the flock's own stream.
    pub fn neighborhood<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Neighborhood {
        Neighborhood::scan(&self.agents, index, &self.params, rng)
    }

    /// Capped steering for `agents[index]` against the current state.
    /// Random draws come from `rng`, never from the flock's own stream.
    pub fn steering<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Vector2 {
        steer(&self.agents, index, &self.params, rng).0
    }

    /// Advances every agent by one tick.
    pub fn update(&mut self) {
        let isolated = match self.params.simulation.update_mode {
            UpdateMode::Sequential => self.update_sequential(),
            UpdateMode::Simultaneous => self.update_simultaneous(),
        };
        self.ticks += 1;
        log::trace!(
            "tick {}: {}/{} agents without neighbors",
            self.ticks,
            isolated,
            self.agents.len()
        );
    }

    // Each agent moves as soon as its steering is known, so later agents
    // see it at its new position.
    fn update_sequential(&mut self) -> usize {
        let mut isolated = 0;
        for i in 0..self.agents.len() {
            let (steering, seen) = steer(&self.agents, i, &self.params, &mut self.rng);
            if !seen {
                isolated += 1;
            }
            self.agents[i].integrate(steering, &self.params, &mut self.rng);
        }
        isolated
    }

    // All steering comes from the pre-tick state. Each agent draws its
    // random samples from its own stream so the parallel pass is
    // reproducible.
    fn update_simultaneous(&mut self) -> usize {
        let base: u64 = self.rng.gen();
        let agents = &self.agents;
        let params = &self.params;
        let steering: Vec<(Vector2, bool)> = (0..agents.len())
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(base.wrapping_add(i as u64));
                steer(agents, i, params, &mut rng)
            })
            .collect();

        let mut isolated = 0;
        for (agent, (force, seen)) in self.agents.iter_mut().zip(steering) {
            if !seen {
                isolated += 1;
            }
            agent.integrate(force, &self.params, &mut self.rng);
        }
        isolated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Point2;

    fn agent(x: f64, y: f64, vx: f64, vy: f64) -> Agent {
        Agent::new(Point2::new(x, y), Vector2::new(vx, vy), Rgb(9, 9, 9))
    }

    fn quiet(mode: UpdateMode) -> Params {
        let mut params = Params::default();
        params.boid.randomness = 0.0;
        params.simulation.update_mode = mode;
        params
    }

    #[test]
    fn spawn_fills_flock() {
        let flock = Flock::spawn(Rgb(1, 1, 1), 25, Params::default(), 4).unwrap();
        assert_eq!(flock.len(), 25);
        assert!(!flock.is_empty());
        assert_eq!(flock.ticks(), 0);
        assert!(flock.agents().iter().all(|a| a.color() == Rgb(1, 1, 1)));
    }

    #[test]
    fn lone_agent_only_drifts() {
        let params = quiet(UpdateMode::Sequential);
        let mut flock = Flock::from_agents(vec![agent(600.0, 400.0, 3.0, 0.0)], params, 0);
        assert_eq!(flock.steering(0, &mut StdRng::seed_from_u64(0)), Vector2::zeros());
        flock.update();
        assert_eq!(flock.agents()[0].position, Point2::new(603.0, 400.0));
        assert_eq!(flock.ticks(), 1);
    }

    #[test]
    fn spawn_rejects_invalid_params() {
        let mut params = Params::default();
        params.bounds.width = 0.0;
        let err = Flock::spawn(Rgb(1, 1, 1), 5, params, 0).err().unwrap();
        assert!(matches!(err, ConfigError::Bounds { .. }));
    }

    #[test]
    fn inspecting_between_ticks_keeps_the_trajectory() {
        let mut watched = Flock::spawn(Rgb(2, 2, 2), 20, Params::default(), 17).unwrap();
        let mut untouched = Flock::spawn(Rgb(2, 2, 2), 20, Params::default(), 17).unwrap();
        let mut side_rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            for i in 0..watched.len() {
                watched.neighborhood(i, &mut side_rng);
                watched.steering(i, &mut side_rng);
            }
            watched.update();
            untouched.update();
        }
        assert_eq!(watched.agents(), untouched.agents());
    }

    #[test]
    fn sequential_agents_see_earlier_moves() {
        let pair = vec![agent(100.0, 100.0, 2.0, 0.0), agent(115.0, 110.0, -2.0, 0.0)];

        let mut seq = Flock::from_agents(pair.clone(), quiet(UpdateMode::Sequential), 1);
        let mut sim = Flock::from_agents(pair, quiet(UpdateMode::Simultaneous), 1);
        assert_eq!(seq.neighborhood(1, &mut StdRng::seed_from_u64(0)).count, 1);
        seq.update();
        sim.update();

        // the first agent steers off the same pre-tick state in both modes
        assert_eq!(seq.agents()[0], sim.agents()[0]);
        assert_ne!(seq.agents()[1], sim.agents()[1]);
    }

    #[test]
    fn simultaneous_ignores_iteration_order() {
        let agents = vec![
            agent(600.0, 400.0, 2.0, 1.0),
            agent(620.0, 410.0, -1.0, 2.0),
            agent(590.0, 425.0, 2.5, -0.5),
            agent(640.0, 395.0, -2.0, -1.0),
        ];
        let mut reversed = agents.clone();
        reversed.reverse();

        let mut forward = Flock::from_agents(agents, quiet(UpdateMode::Simultaneous), 2);
        let mut backward = Flock::from_agents(reversed, quiet(UpdateMode::Simultaneous), 3);
        // few enough ticks that nobody gets inside the random-escape range
        for _ in 0..3 {
            forward.update();
            backward.update();
        }

        for (a, b) in forward.agents().iter().zip(backward.agents().iter().rev()) {
            assert!((a.position - b.position).norm() < 1e-9);
            assert!((a.velocity - b.velocity).norm() < 1e-9);
        }
    }
}

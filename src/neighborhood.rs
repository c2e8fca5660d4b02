//! What a single agent perceives of its flock, and the steering that follows.
//!
//! The scan is a plain O(n²) pass over the flock: every other agent inside
//! `neighbor_dist` (and, with forward perception, inside the view cone)
//! contributes to separation, alignment and cohesion.

use rand::Rng;

use crate::agent::{symmetric, Agent};
use crate::components::Vector2;
use crate::config::{Params, Perception};

/// Raw per-rule sums over the perceived neighbors of one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighborhood {
    pub separation: Vector2,
    pub alignment: Vector2,
    /// Sum of neighbor positions (as vectors from the origin).
    pub cohesion: Vector2,
    pub count: usize,
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self {
            separation: Vector2::zeros(),
            alignment: Vector2::zeros(),
            cohesion: Vector2::zeros(),
            count: 0,
        }
    }
}

/// Is `other` (at `offset` from the agent) inside the agent's view cone?
///
/// A zero offset or a standing agent gives a cosine of 0, i.e. exactly 90°.
/// So a standing agent sees every neighbor in range, where a plain
/// `acos(dot / (speed * distance))` would give NaN and see nobody.
pub fn in_view(velocity: &Vector2, offset: &Vector2, view_angle: f64) -> bool {
    let distance = offset.norm();
    let direction = if distance > 0.0 { offset / distance } else { *offset };
    let speed = velocity.norm();
    let cos = if speed > 0.0 { velocity.dot(&direction) / speed } else { 0.0 };
    let angle = cos.max(-1.0).min(1.0).acos().to_degrees();
    angle <= view_angle
}

impl Neighborhood {
    /// Accumulates the neighbors of `agents[index]`. Self is excluded by
    /// index, so a coincident twin is still a neighbor.
    pub fn scan<R: Rng + ?Sized>(agents: &[Agent], index: usize, params: &Params, rng: &mut R) -> Self {
        let boid = &params.boid;
        let me = &agents[index];
        let mut hood = Neighborhood::default();

        for (j, other) in agents.iter().enumerate() {
            if j == index {
                continue;
            }
            let offset = other.position - me.position;
            let d = offset.norm();
            if d >= boid.neighbor_dist {
                continue;
            }
            if params.simulation.perception == Perception::Forward
                && !in_view(&me.velocity, &offset, boid.view_angle)
            {
                continue;
            }

            if d < boid.desired_separation {
                if d < boid.width {
                    hood.separation += Vector2::new(random_sign(rng), random_sign(rng));
                } else {
                    hood.separation += (me.position - other.position) * (boid.desired_separation / d);
                }
            }
            hood.alignment += other.velocity;
            hood.cohesion += other.position.coords;
            hood.count += 1;
        }

        hood
    }

    /// Weighted blend of the averaged rules plus `noise`, before capping.
    /// Zero when nothing was perceived.
    pub fn blend(&self, agent: &Agent, params: &Params, noise: Vector2) -> Vector2 {
        if self.count == 0 {
            return Vector2::zeros();
        }
        let n = self.count as f64;
        let w = &params.weights;
        let separation = self.separation / n;
        let alignment = self.alignment / n;
        let center = self.cohesion / n;
        let cohesion = (center - agent.position.coords) * w.cohesion;

        separation * w.separation + alignment * w.alignment + cohesion + noise / n
    }

    /// Blended steering for `agent`, with fresh noise, capped at
    /// `max_acceleration`.
    pub fn steering<R: Rng + ?Sized>(&self, agent: &Agent, params: &Params, rng: &mut R) -> Vector2 {
        if self.count == 0 {
            return Vector2::zeros();
        }
        let r = params.boid.randomness;
        let noise = Vector2::new(symmetric(rng, r), symmetric(rng, r));
        limit(self.blend(agent, params, noise), params.boid.max_acceleration)
    }
}

/// Rescales `force` down to `max` if it is longer, keeping its direction.
pub fn limit(force: Vector2, max: f64) -> Vector2 {
    let magnitude = force.norm();
    if magnitude > max {
        force * (max / magnitude)
    } else {
        force
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen::<bool>() {
        1.0
    } else {
        -1.0
    }
}

use rand::Rng;

use crate::components::{Point2, Vector2};
use crate::config::{BoidParams, Bounds, Params, Rgb, SpawnRegion};

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub position: Point2,
    pub velocity: Vector2,
    color: Rgb,
}

/// Uniform sample in `[-extent, extent]`.
pub(crate) fn symmetric<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * 2.0 * extent
}

impl Agent {
    pub fn new(position: Point2, velocity: Vector2, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            color,
        }
    }

    /// Random position inside the spawn region, random velocity with each
    /// axis in `[-max_speed, max_speed]`.
    /// `params` must already be validated; `Flock::spawn` does that.
    pub fn spawn<R: Rng + ?Sized>(color: Rgb, params: &Params, rng: &mut R) -> Self {
        let Bounds { width, height } = params.bounds;
        let position = match params.simulation.spawn {
            SpawnRegion::Center => Point2::new(
                rng.gen_range(width * 0.25, width * 0.75),
                rng.gen_range(height * 0.25, height * 0.75),
            ),
            SpawnRegion::Full => Point2::new(rng.gen_range(0.0, width), rng.gen_range(0.0, height)),
        };
        let max = params.boid.max_speed;
        let velocity = Vector2::new(symmetric(rng, max), symmetric(rng, max));
        Self::new(position, velocity, color)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Heading angle in radians.
    pub fn heading(&self) -> f64 {
        self.velocity.y.atan2(self.velocity.x)
    }

    /// Isosceles triangle `[tip, left, right]` pointing along the heading.
    pub fn silhouette(&self, length: f64, width: f64) -> [Point2; 3] {
        let (sin, cos) = self.heading().sin_cos();
        let forward = Vector2::new(cos, sin);
        let side = Vector2::new(-sin, cos);
        [
            self.position + forward * length,
            self.position + side * width,
            self.position - side * width,
        ]
    }

    /// One tick of motion under an externally computed steering force.
    pub fn integrate<R: Rng + ?Sized>(&mut self, steering: Vector2, params: &Params, rng: &mut R) {
        self.jitter(params.boid.randomness, rng);
        self.check_boundaries(&params.bounds, &params.boid);
        self.velocity += steering;
        self.clamp_speed(params.boid.min_speed, params.boid.max_speed);
        self.position += self.velocity;
        self.confine(&params.bounds);
    }

    pub fn jitter<R: Rng + ?Sized>(&mut self, randomness: f64, rng: &mut R) {
        let dx = symmetric(rng, randomness);
        let dy = symmetric(rng, randomness);
        self.velocity += Vector2::new(dx, dy);
    }

    /// Pushes the velocity away from any edge closer than `margin`. The push
    /// grows as `boundary_force * margin / distance`; an agent sitting on
    /// the edge gets that axis reflected inward instead.
    pub fn check_boundaries(&mut self, bounds: &Bounds, boid: &BoidParams) {
        let push = boid.boundary_force * boid.margin;
        self.velocity.x = repel(self.velocity.x, self.position.x, bounds.width, boid.margin, push);
        self.velocity.y = repel(self.velocity.y, self.position.y, bounds.height, boid.margin, push);
    }

    /// Rescales a nonzero velocity into `[min, max]`. Zero stays zero.
    pub fn clamp_speed(&mut self, min: f64, max: f64) {
        let speed = self.speed();
        if speed > max {
            self.velocity *= max / speed;
        } else if speed < min && speed > 0.0 {
            self.velocity *= min / speed;
        }
    }

    // Puts a coordinate that crossed an edge back on that edge.
    fn confine(&mut self, bounds: &Bounds) {
        self.position.x = self.position.x.max(0.0).min(bounds.width);
        self.position.y = self.position.y.max(0.0).min(bounds.height);
    }
}

fn repel(mut vel: f64, coord: f64, extent: f64, margin: f64, push: f64) -> f64 {
    let near = coord;
    if near < margin {
        let dv = push / near;
        vel = if near > 0.0 && dv.is_finite() { vel + dv } else { vel.abs() };
    }
    let far = extent - coord;
    if far < margin {
        let dv = push / far;
        vel = if far > 0.0 && dv.is_finite() { vel - dv } else { -vel.abs() };
    }
    vel
}

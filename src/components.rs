use specs::{Component, storage::*};
use nalgebra as na;

use crate::flock::Flock;

pub type Point2 = na::Point2<f64>;
pub type Vector2 = na::Vector2<f64>;

/// One flock living in the ECS world.
#[derive(Component)]
#[storage(DenseVecStorage)]
pub struct Swarm(pub Flock);

/// Resource: flocks only step while this is set.
#[derive(Copy, Clone, Debug, Default)]
pub struct Playing(pub bool);

/// Resource: number of ticks the world has stepped.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ticks(pub u64);

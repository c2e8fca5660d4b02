//! Boids flocking: separation, alignment and cohesion over an angle-gated
//! neighborhood, plus edge repulsion and jitter.
//!
//! [`Flock::update`] is one tick. The ECS glue in [`systems`] steps every
//! flock of a specs world; the viewer binary (feature `window`) draws them.

pub mod agent;
pub mod components;
pub mod config;
pub mod error;
pub mod flock;
pub mod globals;
pub mod neighborhood;
pub mod systems;

pub use agent::Agent;
pub use config::{Config, Params, Rgb};
pub use error::ConfigError;
pub use flock::Flock;
pub use neighborhood::Neighborhood;

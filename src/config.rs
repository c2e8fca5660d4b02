//! Parameter bundle the simulation is built from.
//!
//! `Config` is what the viewer loads (every field optional in TOML, missing
//! ones fall back to the constants in `globals`). `Params` is the `Copy`
//! subset each flock carries around.

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::globals::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c[0], c[1], c[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: SCREEN_W,
            height: SCREEN_H,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoidParams {
    pub max_speed: f64,
    pub min_speed: f64,
    pub randomness: f64,
    pub max_acceleration: f64,
    pub desired_separation: f64,
    pub neighbor_dist: f64,
    /// Below this distance separation switches to a random (±1, ±1) push.
    pub width: f64,
    pub length: f64,
    pub margin: f64,
    pub boundary_force: f64,
    /// Half-angle of the forward field of view, in degrees.
    pub view_angle: f64,
}

impl Default for BoidParams {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            min_speed: MIN_SPEED,
            randomness: RANDOMNESS,
            max_acceleration: MAX_ACCELERATION,
            desired_separation: DESIRED_SEPARATION,
            neighbor_dist: NEIGHBOR_DIST,
            width: BOID_WIDTH,
            length: BOID_LENGTH,
            margin: MARGIN,
            boundary_force: BOUNDARY_FORCE,
            view_angle: VIEW_ANGLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub separation: f64,
    pub alignment: f64,
    pub cohesion: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            separation: SEPARATION_WEIGHT,
            alignment: ALIGNMENT_WEIGHT,
            cohesion: COHESION_WEIGHT,
        }
    }
}

/// How a tick orders steering and integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Each agent steers against the current state and moves right away, so
    /// later agents see earlier agents' new positions within the same tick.
    Sequential,
    /// Every agent steers against the pre-tick snapshot, then all move.
    Simultaneous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perception {
    /// Only neighbors within `view_angle` of the heading are seen.
    Forward,
    Omnidirectional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnRegion {
    /// The middle half of the screen on both axes.
    Center,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Simulation {
    pub update_mode: UpdateMode,
    pub perception: Perception,
    pub spawn: SpawnRegion,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::Sequential,
            perception: Perception::Forward,
            spawn: SpawnRegion::Center,
        }
    }
}

/// Everything a flock needs to step itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Params {
    pub bounds: Bounds,
    pub boid: BoidParams,
    pub weights: Weights,
    pub simulation: Simulation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlockSpec {
    pub color: Rgb,
    #[serde(default = "default_flock_size")]
    pub size: usize,
}

fn default_flock_size() -> usize {
    FLOCK_N
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base seed; flock `i` is seeded with `seed + i`. Random when absent.
    pub seed: Option<u64>,
    pub fps: u32,
    pub background: Rgb,
    pub bounds: Bounds,
    pub boid: BoidParams,
    pub weights: Weights,
    pub simulation: Simulation,
    pub flocks: Vec<FlockSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            fps: FPS,
            background: BACKGROUND.into(),
            bounds: Bounds::default(),
            boid: BoidParams::default(),
            weights: Weights::default(),
            simulation: Simulation::default(),
            flocks: PALETTE
                .iter()
                .map(|&color| FlockSpec {
                    color: color.into(),
                    size: FLOCK_N,
                })
                .collect(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn params(&self) -> Params {
        Params {
            bounds: self.bounds,
            boid: self.boid,
            weights: self.weights,
            simulation: self.simulation,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Fps);
        }
        self.params().validate()
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Bounds { width, height } = self.bounds;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Bounds { width, height });
        }

        let b = &self.boid;
        let w = &self.weights;
        let checked = [
            ("max_speed", b.max_speed),
            ("min_speed", b.min_speed),
            ("randomness", b.randomness),
            ("max_acceleration", b.max_acceleration),
            ("desired_separation", b.desired_separation),
            ("neighbor_dist", b.neighbor_dist),
            ("width", b.width),
            ("length", b.length),
            ("margin", b.margin),
            ("boundary_force", b.boundary_force),
            ("separation", w.separation),
            ("alignment", w.alignment),
            ("cohesion", w.cohesion),
        ];
        for &(name, value) in checked.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Parameter { name, value });
            }
        }

        if b.min_speed > b.max_speed {
            return Err(ConfigError::SpeedRange {
                min: b.min_speed,
                max: b.max_speed,
            });
        }
        if !(0.0..=180.0).contains(&b.view_angle) {
            return Err(ConfigError::ViewAngle(b.view_angle));
        }
        Ok(())
    }
}

pub const SCREEN_W: f64 = 1200.0;
pub const SCREEN_H: f64 = 800.0;
pub const FPS: u32 = 60;

pub const FLOCK_N: usize = 30;

pub const BOID_LENGTH: f64 = 10.0;
pub const BOID_WIDTH: f64 = 5.0;

pub const MAX_SPEED: f64 = 4.0;
pub const MIN_SPEED: f64 = 2.0;
pub const RANDOMNESS: f64 = 0.3;
pub const MAX_ACCELERATION: f64 = 0.2;

pub const DESIRED_SEPARATION: f64 = 30.0;
pub const NEIGHBOR_DIST: f64 = 50.0;
// half-angle of the forward field of view, degrees
pub const VIEW_ANGLE: f64 = 90.0;

pub const MARGIN: f64 = 50.0;
pub const BOUNDARY_FORCE: f64 = 0.05;

pub const SEPARATION_WEIGHT: f64 = 0.05;
pub const ALIGNMENT_WEIGHT: f64 = 0.05;
pub const COHESION_WEIGHT: f64 = 0.005;

pub const BACKGROUND: [u8; 3] = [20, 24, 32];
pub const PALETTE: [[u8; 3]; 4] = [
    [235, 235, 235],
    [240, 90, 80],
    [90, 200, 120],
    [80, 150, 240],
];

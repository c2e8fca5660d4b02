use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Screen bounds must be positive, got {width}x{height}")]
    Bounds { width: f64, height: f64 },
    #[error("Speed range is empty: min_speed {min} > max_speed {max}")]
    SpeedRange { min: f64, max: f64 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Parameter { name: &'static str, value: f64 },
    #[error("View angle must lie in [0, 180] degrees, got {0}")]
    ViewAngle(f64),
    #[error("Frame rate must be positive")]
    Fps,
}

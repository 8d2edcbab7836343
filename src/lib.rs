pub mod config;
pub mod vector;

pub use config::{Config, ConfigError};
pub use vector::{FixedVec, Vec3Str, Vec3b, Vec3d, Vec3i};

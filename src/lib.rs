pub mod detector_config;
pub mod error;
pub mod systems;
pub mod tracking;

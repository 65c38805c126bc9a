//! Configuration for Vento galleries.
//!
//! A [`VentoConfig`] bundles the gallery options with the physics and gesture
//! tuning tables. [`ConfigLoader`] resolves it from the environment, a file
//! or inline JSON, and runs the guard rails in [`validation`] before handing
//! it out.

pub mod loader;
pub mod models;
pub mod telemetry;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{ConfigSource, VentoConfig};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};

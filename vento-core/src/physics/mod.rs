//! Strip physics: snap-to-frame for the stage, free inertial scrolling for
//! thumbnail strips.
//!
//! Both strategies step once per tick and share the same drag resistance law:
//! past an edge, a pointer delta is scaled by `1 / (1 + overshoot * k)` so the
//! strip stiffens the further it is pulled.

mod free_scroll;
mod snap;

pub use free_scroll::FreeScrollPhysics;
pub use snap::SnapPhysics;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use vento_contracts::physics::{Bounds, PhysicsStrategy};

/// Drag stiffness past the bounds.
pub const DRAG_RESISTANCE: f64 = 0.005;
/// Velocity/distance below which a spring is considered settled.
pub const REST_EPSILON: f64 = 0.1;
/// Fraction of the remaining distance covered per tick in linear mode.
pub const LINEAR_FACTOR: f64 = 0.15;
/// Distance below which linear mode snaps onto the target.
pub const LINEAR_REST_DISTANCE: f64 = 0.5;
/// Slack past the bounds before the snap strategy switches to spring mode.
pub const SPRING_MODE_MARGIN: f64 = 1.0;

/// Friction/spring pair of a strategy.
///
/// `friction` is a per-tick decay factor and `spring` a stiffness factor; both
/// live in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub friction: f64,
    pub spring: f64,
}

impl SpringConfig {
    pub const SNAP: SpringConfig = SpringConfig {
        friction: 0.82,
        spring: 0.04,
    };

    pub const FREE_SCROLL: SpringConfig = SpringConfig {
        friction: 0.95,
        spring: 0.05,
    };

    /// Replace unusable fields (zero, negative, NaN) with `defaults`.
    pub fn or_defaults(self, defaults: SpringConfig) -> SpringConfig {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        SpringConfig {
            friction: if usable(self.friction) {
                self.friction
            } else {
                defaults.friction
            },
            spring: if usable(self.spring) {
                self.spring
            } else {
                defaults.spring
            },
        }
    }
}

/// Spring constants for both strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub snap: SpringConfig,
    pub free_scroll: SpringConfig,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            snap: SpringConfig::SNAP,
            free_scroll: SpringConfig::FREE_SCROLL,
        }
    }
}

impl PhysicsTuning {
    pub fn snap(&self) -> SnapPhysics {
        SnapPhysics::new(self.snap)
    }

    pub fn free_scroll(&self) -> FreeScrollPhysics {
        FreeScrollPhysics::new(self.free_scroll)
    }
}

/// A strategy shared between the renderer that ticks it and the gesture
/// translator that drags it.
pub type SharedPhysics = Arc<Mutex<dyn PhysicsStrategy>>;

pub fn shared(strategy: impl PhysicsStrategy + 'static) -> SharedPhysics {
    Arc::new(Mutex::new(strategy))
}

/// Pointer delta after edge resistance.
#[inline]
pub fn resisted_delta(bounds: Bounds, position: f64, delta: f64) -> f64 {
    let over = bounds.overshoot(position);
    if over > 0.0 {
        delta * (1.0 / (1.0 + over * DRAG_RESISTANCE))
    } else {
        delta
    }
}

use serde::{Deserialize, Serialize};

/// Empirically tuned gesture constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Pointer travel before a press becomes a drag, in px.
    pub move_threshold: f64,
    /// Drag distance that always counts as a swipe, in px.
    pub swipe_distance: f64,
    /// Release speed that counts as a swipe, in px/ms.
    pub swipe_speed: f64,
    /// Converts a px/ms release speed into a per-tick physics velocity.
    pub release_scale: f64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            move_threshold: 5.0,
            swipe_distance: 50.0,
            swipe_speed: 0.5,
            release_scale: 16.0,
        }
    }
}

impl GestureTuning {
    pub fn is_swipe(&self, distance: f64, speed: f64) -> bool {
        distance.abs() > self.swipe_distance || speed.abs() > self.swipe_speed
    }
}

use vento_contracts::physics::{Bounds, PhysicsStrategy};

use super::{
    LINEAR_FACTOR, LINEAR_REST_DISTANCE, REST_EPSILON, SPRING_MODE_MARGIN,
    SpringConfig, resisted_delta,
};

/// Snap-to-frame physics for the main stage.
///
/// Inside the bounds the strip interpolates linearly toward its target, which
/// never overshoots. Once it sits more than [`SPRING_MODE_MARGIN`] past an
/// edge it switches to a spring-damper so the rubber band pulls back with
/// some give.
#[derive(Debug, Clone)]
pub struct SnapPhysics {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    resting: bool,
    bounds: Bounds,
}

impl Default for SnapPhysics {
    fn default() -> Self {
        Self::new(SpringConfig::SNAP)
    }
}

impl SnapPhysics {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config: config.or_defaults(SpringConfig::SNAP),
            position: 0.0,
            velocity: 0.0,
            target: 0.0,
            resting: true,
            bounds: Bounds::UNBOUNDED,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    fn in_spring_mode(&self) -> bool {
        self.position > self.bounds.max + SPRING_MODE_MARGIN
            || self.position < self.bounds.min - SPRING_MODE_MARGIN
    }

    fn settle(&mut self) -> bool {
        self.position = self.target;
        self.velocity = 0.0;
        self.resting = true;
        false
    }
}

impl PhysicsStrategy for SnapPhysics {
    fn set_bounds(&mut self, min: f64, max: f64) {
        self.bounds = Bounds::new(min, max);
    }

    fn set_target(&mut self, target: f64) {
        self.target = self.bounds.clamp(target);
        self.resting = false;
    }

    fn force_set(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.resting = true;
    }

    fn stop(&mut self) {
        self.velocity = 0.0;
        self.target = self.position;
        self.resting = true;
    }

    fn drag(&mut self, delta: f64) -> f64 {
        self.position += resisted_delta(self.bounds, self.position, delta);
        // The strip follows the pointer; nothing to animate until release.
        self.target = self.position;
        self.resting = true;
        self.position
    }

    fn release(&mut self, velocity: f64) {
        self.velocity = velocity;
        self.resting = false;
    }

    fn update(&mut self) -> bool {
        if self.resting && self.velocity.abs() < REST_EPSILON {
            return false;
        }

        let distance = self.target - self.position;

        if !self.in_spring_mode() {
            self.position += distance * LINEAR_FACTOR;
            self.velocity = 0.0;

            if distance.abs() < LINEAR_REST_DISTANCE {
                return self.settle();
            }
        } else {
            let force = distance * self.config.spring;
            self.velocity += force;
            self.velocity *= self.config.friction;
            self.position += self.velocity;

            if self.velocity.abs() < REST_EPSILON
                && distance.abs() < REST_EPSILON
            {
                return self.settle();
            }
        }

        true
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }

    fn target(&self) -> f64 {
        self.target
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn is_resting(&self) -> bool {
        self.resting
    }
}

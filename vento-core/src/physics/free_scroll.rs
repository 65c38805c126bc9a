use vento_contracts::physics::{Bounds, PhysicsStrategy};

use super::{REST_EPSILON, SpringConfig, resisted_delta};

/// Inertial scrolling with edge springs, used for thumbnail strips.
///
/// Inside the bounds velocity simply decays by `friction` each tick. Outside,
/// a spring pulls toward the nearest bound. The target is recorded for callers
/// but does not pull the strip; thumbnails glide rather than snap.
#[derive(Debug, Clone)]
pub struct FreeScrollPhysics {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    resting: bool,
    bounds: Bounds,
}

impl Default for FreeScrollPhysics {
    fn default() -> Self {
        Self::new(SpringConfig::FREE_SCROLL)
    }
}

impl FreeScrollPhysics {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config: config.or_defaults(SpringConfig::FREE_SCROLL),
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

    /// Launch velocity whose friction decay covers `distance` inside the
    /// bounds. Friction applies before the first step moves the strip.
    pub fn glide_velocity(&self, distance: f64) -> f64 {
        let friction = self.config.friction;
        distance * (1.0 - friction) / friction
    }
}

impl PhysicsStrategy for FreeScrollPhysics {
    fn set_bounds(&mut self, min: f64, max: f64) {
        self.bounds = Bounds::new(min, max);
    }

    fn set_target(&mut self, target: f64) {
        self.target = target;
        self.resting = false;
    }

    /// Records the target and launches a glide that coasts onto it.
    fn seek(&mut self, target: f64) {
        self.set_target(target);
        let distance = target - self.position;
        self.release(self.glide_velocity(distance));
    }

    fn force_set(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.resting = true;
    }

    fn stop(&mut self) {
        self.velocity = 0.0;
        self.resting = true;
    }

    fn drag(&mut self, delta: f64) -> f64 {
        self.position += resisted_delta(self.bounds, self.position, delta);
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

        self.velocity *= self.config.friction;
        self.position += self.velocity;

        if self.position < self.bounds.min {
            let distance = self.bounds.min - self.position;
            self.velocity += distance * self.config.spring;
        } else if self.position > self.bounds.max {
            let distance = self.bounds.max - self.position;
            self.velocity += distance * self.config.spring;
        } else if self.velocity.abs() < REST_EPSILON {
            self.velocity = 0.0;
            self.resting = true;
            return false;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DRAG_RESISTANCE;

    fn strip() -> FreeScrollPhysics {
        let mut physics = FreeScrollPhysics::default();
        physics.set_bounds(-500.0, 0.0);
        physics.force_set(0.0);
        physics
    }

    #[test]
    fn drag_beyond_max_is_scaled_down() {
        let mut physics = strip();
        physics.drag(30.0);
        let over = physics.position() - physics.bounds().max;
        assert_eq!(over, 30.0);

        let before = physics.position();
        let after = physics.drag(20.0);
        let applied = after - before;
        assert_eq!(applied, 20.0 * (1.0 / (1.0 + over * DRAG_RESISTANCE)));
        assert!(applied < 20.0);
    }

    #[test]
    fn drag_beyond_min_is_scaled_down() {
        let mut physics = strip();
        physics.force_set(-540.0);
        let before = physics.position();
        let applied = physics.drag(-10.0) - before;
        assert!(applied > -10.0 && applied < 0.0);
    }

    #[test]
    fn fling_decays_inside_bounds() {
        let mut physics = strip();
        physics.force_set(-250.0);
        physics.release(-8.0);

        let mut steps = 0;
        while physics.update() {
            steps += 1;
            assert!(steps < 1_000);
        }
        assert!(physics.is_resting());
        assert_eq!(physics.velocity(), 0.0);
        assert!(physics.position() < -250.0);
        assert!(physics.bounds().contains(physics.position()));
    }

    #[test]
    fn overshoot_is_pulled_back_to_the_edge() {
        let mut physics = strip();
        physics.drag(60.0);
        physics.release(5.0);

        let mut peak: f64 = physics.position();
        for _ in 0..2_000 {
            if !physics.update() {
                break;
            }
            peak = peak.max(physics.position());
        }
        assert!(peak > 60.0, "throw carries past the drag point first");
        assert!(physics.is_resting());
        assert!(physics.position() <= 0.0);
        assert!(physics.position() > -500.0);
    }

    #[test]
    fn target_does_not_pull() {
        let mut physics = strip();
        physics.set_target(-300.0);
        assert!(!physics.is_resting());
        assert!(!physics.update());
        assert_eq!(physics.position(), 0.0);
        assert_eq!(physics.target(), -300.0);
    }

    #[test]
    fn seek_glides_close_to_target() {
        let mut physics = strip();
        physics.seek(-200.0);
        assert_eq!(physics.target(), -200.0);
        while physics.update() {}
        assert!((physics.position() + 200.0).abs() < 5.0);
    }
}

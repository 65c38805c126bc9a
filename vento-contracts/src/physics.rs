//! Physics contract shared by every strip simulation.

/// Legal position range of a strip. Unbounded by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }

    /// Clamp into `[min, max]`. Inverted bounds collapse onto `max`.
    pub fn clamp(&self, position: f64) -> f64 {
        position.max(self.min).min(self.max)
    }

    /// Distance past the nearest edge; zero inside the range.
    pub fn overshoot(&self, position: f64) -> f64 {
        if position > self.max {
            position - self.max
        } else if position < self.min {
            self.min - position
        } else {
            0.0
        }
    }
}

/// A per-strip simulation owning a scalar position, velocity and target.
///
/// Implementations are driven once per tick through [`update`] and never
/// reject input: out-of-range values are absorbed through resistance or
/// clamping.
///
/// [`update`]: PhysicsStrategy::update
pub trait PhysicsStrategy: Send {
    /// Replace the legal range. Does not move the position.
    fn set_bounds(&mut self, min: f64, max: f64);

    /// Set the resting position to drive toward and wake the simulation.
    fn set_target(&mut self, target: f64);

    /// Move toward `target` using the strategy's own motion law. Strategies
    /// whose target exerts a pull only need [`set_target`].
    ///
    /// [`set_target`]: PhysicsStrategy::set_target
    fn seek(&mut self, target: f64) {
        self.set_target(target);
    }

    /// Jump to `value` without animating: position and target both become
    /// `value`, velocity is zeroed and the simulation rests.
    fn force_set(&mut self, value: f64);

    /// Freeze in place at the current position, cancelling any motion.
    fn stop(&mut self);

    /// Apply a pointer delta directly to the position, with resistance past
    /// the bounds. Returns the new position.
    fn drag(&mut self, delta: f64) -> f64;

    /// Seed the velocity from a measured throw and hand control back to
    /// [`update`](PhysicsStrategy::update).
    fn release(&mut self, velocity: f64);

    /// Advance one simulation step. Returns whether the position is still
    /// changing.
    fn update(&mut self) -> bool;

    /// Authoritative position consumed by rendering each tick.
    fn position(&self) -> f64;

    fn velocity(&self) -> f64;

    fn target(&self) -> f64;

    fn bounds(&self) -> Bounds;

    fn is_resting(&self) -> bool;
}

use thiserror::Error;
use vento_core::SpringConfig;

use crate::models::VentoConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("physics.{strip}.{field} must lie strictly between 0 and 1 (got {value})")]
    SpringOutOfRange {
        strip: &'static str,
        field: &'static str,
        value: f64,
    },
    #[error("gesture.{field} must be a positive number (got {value})")]
    NonPositiveThreshold { field: &'static str, value: f64 },
    #[error("gallery.transition_duration_ms must be greater than zero")]
    ZeroTransitionDuration,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Reject values the physics or gesture code cannot work with and collect
/// warnings for combinations that are legal but probably unintended.
pub fn apply_guard_rails(
    config: &VentoConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    check_spring("snap", config.physics.snap)?;
    check_spring("free_scroll", config.physics.free_scroll)?;

    let gesture = &config.gesture;
    for (field, value) in [
        ("move_threshold", gesture.move_threshold),
        ("swipe_distance", gesture.swipe_distance),
        ("swipe_speed", gesture.swipe_speed),
        ("release_scale", gesture.release_scale),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigGuardRailError::NonPositiveThreshold {
                field,
                value,
            });
        }
    }

    let gallery = &config.gallery;
    if gallery.transition_duration_ms == 0 {
        return Err(ConfigGuardRailError::ZeroTransitionDuration);
    }

    match gallery.autoplay_ms {
        Some(0) => warnings.push_with_hint(
            "gallery.autoplay_ms is 0; autoplay is disabled",
            "Remove the key or set a positive interval",
        ),
        Some(ms) if ms <= gallery.transition_duration_ms => warnings
            .push_with_hint(
                format!(
                    "autoplay interval ({ms} ms) does not exceed the transition duration ({} ms)",
                    gallery.transition_duration_ms
                ),
                "Frames will advance as soon as each transition settles",
            ),
        _ => {}
    }

    if gesture.move_threshold >= gesture.swipe_distance {
        warnings.push(
            "gesture.move_threshold is not below swipe_distance; every drag will count as a swipe",
        );
    }

    Ok(warnings)
}

fn check_spring(
    strip: &'static str,
    spring: SpringConfig,
) -> Result<(), ConfigGuardRailError> {
    for (field, value) in [("friction", spring.friction), ("spring", spring.spring)]
    {
        if !(value > 0.0 && value < 1.0) {
            return Err(ConfigGuardRailError::SpringOutOfRange {
                strip,
                field,
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings = apply_guard_rails(&VentoConfig::default()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn friction_of_one_is_rejected() {
        let mut config = VentoConfig::default();
        config.physics.free_scroll.friction = 1.0;
        assert_eq!(
            apply_guard_rails(&config).unwrap_err(),
            ConfigGuardRailError::SpringOutOfRange {
                strip: "free_scroll",
                field: "friction",
                value: 1.0,
            }
        );
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let mut config = VentoConfig::default();
        config.gesture.swipe_speed = f64::NAN;
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::NonPositiveThreshold {
                field: "swipe_speed",
                ..
            })
        ));
    }

    #[test]
    fn zero_transition_is_rejected() {
        let mut config = VentoConfig::default();
        config.gallery.transition_duration_ms = 0;
        assert_eq!(
            apply_guard_rails(&config).unwrap_err(),
            ConfigGuardRailError::ZeroTransitionDuration
        );
    }

    #[test]
    fn fast_autoplay_warns() {
        let mut config = VentoConfig::default();
        config.gallery.autoplay_ms = Some(200);
        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].message.contains("200 ms"));
    }
}

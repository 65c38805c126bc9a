use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vento_core::{GestureTuning, PhysicsTuning};
use vento_model::GalleryOptions;

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("built-in defaults"),
            Self::EnvPath(path) => {
                write!(f, "$VENTO_CONFIG_PATH ({})", path.display())
            }
            Self::EnvInline => f.write_str("$VENTO_CONFIG_JSON"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything a host needs to build a gallery besides its frames.
///
/// Every section is optional in the file; missing keys fall back to the
/// defaults of the corresponding type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VentoConfig {
    /// Construction options: looping, transition, autoplay, navigation and
    /// input toggles.
    pub gallery: GalleryOptions,
    /// Friction/spring pairs for the stage (snap) and thumbnail (free
    /// scroll) strips. Both factors must stay strictly between 0 and 1.
    pub physics: PhysicsTuning,
    /// Pointer gesture thresholds. Raising `swipe_distance` or
    /// `swipe_speed` makes short flicks fall back to the current frame.
    pub gesture: GestureTuning,
}

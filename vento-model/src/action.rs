//! Actions accepted by the gallery reducer.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Every transition the gallery store understands.
///
/// `Unknown` is what untyped sources (scripts, wire payloads, plugins) parse
/// into when they name a kind this version does not know. The reducer absorbs
/// it without changing state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum GalleryAction {
    Next,
    Prev,
    /// Out-of-range indices (negative included) are clamped by the reducer.
    GoTo { index: i64 },
    StartTransition,
    EndTransition,
    ToggleFullscreen,
    PlayVideo {
        #[cfg_attr(feature = "serde", serde(rename = "videoId"))]
        video_id: String,
    },
    StopVideo,
    StartAutoplay,
    StopAutoplay,
    SetDragging {
        #[cfg_attr(feature = "serde", serde(rename = "isDragging"))]
        is_dragging: bool,
    },
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl GalleryAction {
    pub fn go_to(index: impl TryInto<i64>) -> Self {
        Self::GoTo {
            index: index.try_into().unwrap_or(i64::MAX),
        }
    }

    pub fn play_video(video_id: impl Into<String>) -> Self {
        Self::PlayVideo {
            video_id: video_id.into(),
        }
    }

    pub fn set_dragging(is_dragging: bool) -> Self {
        Self::SetDragging { is_dragging }
    }

    /// Wire name of the action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Next => "NEXT",
            Self::Prev => "PREV",
            Self::GoTo { .. } => "GO_TO",
            Self::StartTransition => "START_TRANSITION",
            Self::EndTransition => "END_TRANSITION",
            Self::ToggleFullscreen => "TOGGLE_FULLSCREEN",
            Self::PlayVideo { .. } => "PLAY_VIDEO",
            Self::StopVideo => "STOP_VIDEO",
            Self::StartAutoplay => "START_AUTOPLAY",
            Self::StopAutoplay => "STOP_AUTOPLAY",
            Self::SetDragging { .. } => "SET_DRAGGING",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Build an action from its kind name and optional argument.
    ///
    /// Unrecognised kinds yield [`GalleryAction::Unknown`]; a recognised kind
    /// with a missing or malformed argument is an error.
    pub fn from_kind(kind: &str, arg: Option<&str>) -> Result<Self, ModelError> {
        let kind = kind.trim().to_ascii_uppercase();
        let arg = arg.map(str::trim).filter(|a| !a.is_empty());
        let invalid = |reason: &str| ModelError::InvalidAction {
            kind: kind.clone(),
            reason: reason.to_string(),
        };

        let action = match kind.as_str() {
            "NEXT" => Self::Next,
            "PREV" => Self::Prev,
            "GO_TO" => {
                let raw = arg.ok_or_else(|| invalid("missing index"))?;
                let index = raw
                    .parse::<i64>()
                    .map_err(|_| invalid("index is not an integer"))?;
                Self::GoTo { index }
            }
            "START_TRANSITION" => Self::StartTransition,
            "END_TRANSITION" => Self::EndTransition,
            "TOGGLE_FULLSCREEN" => Self::ToggleFullscreen,
            "PLAY_VIDEO" => {
                let id = arg.ok_or_else(|| invalid("missing video id"))?;
                Self::play_video(id)
            }
            "STOP_VIDEO" => Self::StopVideo,
            "START_AUTOPLAY" => Self::StartAutoplay,
            "STOP_AUTOPLAY" => Self::StopAutoplay,
            "SET_DRAGGING" => {
                let raw = arg.ok_or_else(|| invalid("missing flag"))?;
                let is_dragging = raw
                    .parse::<bool>()
                    .map_err(|_| invalid("flag is not a boolean"))?;
                Self::SetDragging { is_dragging }
            }
            _ => Self::Unknown,
        };
        Ok(action)
    }
}

/// `KIND` or `KIND:ARG`, e.g. `NEXT`, `GO_TO:3`, `SET_DRAGGING:true`.
impl FromStr for GalleryAction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((kind, arg)) => Self::from_kind(kind, Some(arg)),
            None => Self::from_kind(s, None),
        }
    }
}

impl fmt::Display for GalleryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoTo { index } => write!(f, "GO_TO:{index}"),
            Self::PlayVideo { video_id } => write!(f, "PLAY_VIDEO:{video_id}"),
            Self::SetDragging { is_dragging } => {
                write!(f, "SET_DRAGGING:{is_dragging}")
            }
            other => f.write_str(other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_form() {
        assert_eq!("next".parse(), Ok(GalleryAction::Next));
        assert_eq!("GO_TO:-4".parse(), Ok(GalleryAction::GoTo { index: -4 }));
        assert_eq!(
            "SET_DRAGGING: true".parse(),
            Ok(GalleryAction::set_dragging(true))
        );
        assert_eq!(
            "PLAY_VIDEO:yt-1".parse(),
            Ok(GalleryAction::play_video("yt-1"))
        );
    }

    #[test]
    fn unknown_kind_is_not_an_error() {
        assert_eq!("WARP_DRIVE".parse(), Ok(GalleryAction::Unknown));
    }

    #[test]
    fn malformed_argument_is_an_error() {
        assert!("GO_TO".parse::<GalleryAction>().is_err());
        assert!("GO_TO:abc".parse::<GalleryAction>().is_err());
        assert!("SET_DRAGGING:maybe".parse::<GalleryAction>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        let action = GalleryAction::go_to(7);
        assert_eq!(action.to_string().parse(), Ok(action));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_type_tag() {
        let action: GalleryAction =
            serde_json::from_str(r#"{"type":"GO_TO","index":2}"#).unwrap();
        assert_eq!(action, GalleryAction::GoTo { index: 2 });

        let action: GalleryAction =
            serde_json::from_str(r#"{"type":"SOMETHING_NEW"}"#).unwrap();
        assert_eq!(action, GalleryAction::Unknown);
    }
}

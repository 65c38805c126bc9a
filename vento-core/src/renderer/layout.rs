use serde::{Deserialize, Serialize};
use vento_contracts::physics::Bounds;

/// Which strip a renderer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripKind {
    /// One frame per viewport; the current frame fills the stage.
    Stage,
    /// Many small frames; the current one is centred when possible.
    Thumbs,
}

/// Geometry of a strip along its axis, in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripLayout {
    pub frame_extent: f64,
    pub viewport_extent: f64,
}

impl StripLayout {
    pub fn new(frame_extent: f64, viewport_extent: f64) -> Self {
        Self {
            frame_extent: frame_extent.max(0.0),
            viewport_extent: viewport_extent.max(0.0),
        }
    }

    /// Stage layout where every frame spans the viewport.
    pub fn stage(viewport_extent: f64) -> Self {
        Self::new(viewport_extent, viewport_extent)
    }

    pub fn content_extent(&self, frame_count: usize) -> f64 {
        frame_count as f64 * self.frame_extent
    }

    pub fn bounds(&self, kind: StripKind, frame_count: usize) -> Bounds {
        match kind {
            StripKind::Stage => {
                let last = frame_count.saturating_sub(1) as f64;
                Bounds::new(-(last * self.frame_extent), 0.0)
            }
            StripKind::Thumbs => {
                let overflow =
                    self.content_extent(frame_count) - self.viewport_extent;
                Bounds::new((-overflow).min(0.0), 0.0)
            }
        }
    }

    /// Resting position that shows `index`.
    pub fn target(&self, kind: StripKind, frame_count: usize, index: usize) -> f64 {
        match kind {
            StripKind::Stage => -(index as f64 * self.frame_extent),
            StripKind::Thumbs => {
                let centre = index as f64 * self.frame_extent
                    + self.frame_extent / 2.0;
                let offset = self.viewport_extent / 2.0 - centre;
                self.bounds(kind, frame_count).clamp(offset)
            }
        }
    }
}

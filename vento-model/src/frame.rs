//! Frames: the navigable items of a gallery.

use std::fmt;

/// Stable identity of a frame within one gallery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrameId(String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FrameId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FrameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Hosting service of an embedded video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VideoProvider {
    Youtube,
    Vimeo,
    Custom,
}

/// Video reference attached to a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoInfo {
    pub provider: VideoProvider,
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
}

impl VideoInfo {
    pub fn youtube(id: impl Into<String>) -> Self {
        Self {
            provider: VideoProvider::Youtube,
            id: id.into(),
            url: None,
        }
    }

    pub fn vimeo(id: impl Into<String>) -> Self {
        Self {
            provider: VideoProvider::Vimeo,
            id: id.into(),
            url: None,
        }
    }

    pub fn custom(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            provider: VideoProvider::Custom,
            id: id.into(),
            url: Some(url.into()),
        }
    }

    /// Player URL the host should embed for this video.
    ///
    /// Custom videos without a URL have nothing to embed.
    pub fn embed_url(&self) -> Option<String> {
        match self.provider {
            VideoProvider::Youtube => {
                Some(format!("https://www.youtube.com/embed/{}", self.id))
            }
            VideoProvider::Vimeo => {
                Some(format!("https://player.vimeo.com/video/{}", self.id))
            }
            VideoProvider::Custom => self.url.clone(),
        }
    }
}

/// One navigable item in the gallery: image, video reference, or arbitrary
/// host content addressed by id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub id: FrameId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub src: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumb: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caption: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub video: Option<VideoInfo>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ratio: Option<f64>,
}

impl Frame {
    /// Bare frame with only an identity.
    pub fn new(id: impl Into<FrameId>) -> Self {
        Self {
            id: id.into(),
            src: None,
            thumb: None,
            caption: None,
            alt: None,
            video: None,
            width: None,
            height: None,
            ratio: None,
        }
    }

    pub fn image(id: impl Into<FrameId>, src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::new(id)
        }
    }

    pub fn video(id: impl Into<FrameId>, video: VideoInfo) -> Self {
        Self {
            video: Some(video),
            ..Self::new(id)
        }
    }

    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.thumb = Some(thumb.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        if height > 0 {
            self.ratio = Some(f64::from(width) / f64::from(height));
        }
        self
    }

    pub fn is_video(&self) -> bool {
        self.video.is_some()
    }

    /// Thumbnail source, falling back to the full image.
    pub fn thumb_or_src(&self) -> Option<&str> {
        self.thumb.as_deref().or(self.src.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url_per_provider() {
        assert_eq!(
            VideoInfo::youtube("abc").embed_url().as_deref(),
            Some("https://www.youtube.com/embed/abc")
        );
        assert_eq!(
            VideoInfo::vimeo("42").embed_url().as_deref(),
            Some("https://player.vimeo.com/video/42")
        );
        assert_eq!(
            VideoInfo::custom("c", "https://cdn.example/v.mp4")
                .embed_url()
                .as_deref(),
            Some("https://cdn.example/v.mp4")
        );

        let bare = VideoInfo {
            provider: VideoProvider::Custom,
            id: "c".into(),
            url: None,
        };
        assert!(bare.embed_url().is_none());
    }

    #[test]
    fn thumb_falls_back_to_src() {
        let frame = Frame::image("1", "full.jpg");
        assert_eq!(frame.thumb_or_src(), Some("full.jpg"));
        let frame = frame.with_thumb("t.jpg");
        assert_eq!(frame.thumb_or_src(), Some("t.jpg"));
    }
}

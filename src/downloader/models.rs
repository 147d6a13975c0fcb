// Common data models for the acquisition engine

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Coarse quality request mapped deterministically to one stream.
///
/// Low and Medium are exact matches (360p / 720p progressive mp4);
/// High takes the best combined stream on offer, whatever its label.
/// A tier that cannot be satisfied is a failure, never a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    /// Exact resolution label a tier demands, if it demands one
    pub fn exact_label(&self) -> Option<&'static str> {
        match self {
            Self::Low => Some("360p"),
            Self::Medium => Some("720p"),
            Self::High => None,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// What the caller asked the engine to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadMode {
    /// One video saved as a video file
    VideoAsVideo,
    /// One video saved as an audio-only file
    VideoAsAudio,
    /// Every playlist item saved as a video file
    PlaylistAsVideo,
    /// Every playlist item saved as an audio-only file
    PlaylistAsAudio,
}

impl DownloadMode {
    /// Whether the reference names a playlist rather than a single item
    pub fn is_playlist(&self) -> bool {
        matches!(self, Self::PlaylistAsVideo | Self::PlaylistAsAudio)
    }

    /// Whether the final artifact is audio-only
    pub fn wants_audio(&self) -> bool {
        matches!(self, Self::VideoAsAudio | Self::PlaylistAsAudio)
    }

    /// The single-item mode a batch applies to each of its items
    pub fn per_item(&self) -> DownloadMode {
        match self {
            Self::PlaylistAsVideo => Self::VideoAsVideo,
            Self::PlaylistAsAudio => Self::VideoAsAudio,
            other => *other,
        }
    }
}

/// One submission to the engine. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Opaque locator for a video or playlist
    pub reference: String,
    /// None means the caller never picked a mode; the engine rejects it
    pub mode: Option<DownloadMode>,
    pub tier: QualityTier,
}

impl DownloadRequest {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            mode: None,
            tier: QualityTier::Medium,
        }
    }

    pub fn with_mode(mut self, mode: DownloadMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.tier = tier;
        self
    }
}

/// One downloadable encoding of an item, as the provider describes it.
/// Snapshot taken at resolution time; never cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Provider's opaque key for this encoding
    pub format_id: String,
    /// Resolution label such as "360p", "720p", "1080p"; absent for audio
    pub resolution: Option<String>,
    /// Container/mime indicator, e.g. "video/mp4" or "audio/mp4"
    pub mime_type: String,
    /// Carries sound but no picture
    pub is_audio_only: bool,
    /// Carries picture and sound in one file
    pub is_progressive: bool,
    /// Provider's default on-disk name for this stream
    pub default_filename: String,
}

impl StreamDescriptor {
    /// Numeric height parsed from the resolution label ("1080p" -> 1080).
    /// None when the label is absent or has no leading digits.
    pub fn resolution_height(&self) -> Option<u32> {
        let label = self.resolution.as_deref()?;
        let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

/// Metadata snapshot for one resolved video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub duration_seconds: u64,
    pub thumbnail_url: String,
    pub streams: Vec<StreamDescriptor>,
}

/// Metadata snapshot for one resolved playlist.
/// `items` preserves provider order and is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub title: String,
    pub thumbnail_url: String,
    pub items: Vec<String>,
}

/// What a successful download reports back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResult {
    pub title: String,
    /// Video duration as "h:mm:ss", or playlist item count as a string
    pub length: String,
    pub thumbnail_url: String,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Where single downloads land and playlist folders are created
    pub download_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_descriptor(resolution: Option<&str>) -> StreamDescriptor {
        StreamDescriptor {
            format_id: "22".to_string(),
            resolution: resolution.map(String::from),
            mime_type: "video/mp4".to_string(),
            is_audio_only: false,
            is_progressive: true,
            default_filename: "clip.mp4".to_string(),
        }
    }

    #[test]
    fn resolution_height_parses_plain_labels() {
        assert_eq!(make_descriptor(Some("1080p")).resolution_height(), Some(1080));
        assert_eq!(make_descriptor(Some("360p")).resolution_height(), Some(360));
    }

    #[test]
    fn resolution_height_handles_suffixed_and_missing_labels() {
        assert_eq!(make_descriptor(Some("720p60")).resolution_height(), Some(720));
        assert_eq!(make_descriptor(Some("audio")).resolution_height(), None);
        assert_eq!(make_descriptor(None).resolution_height(), None);
    }

    #[test]
    fn playlist_modes_map_to_their_single_item_mode() {
        assert_eq!(
            DownloadMode::PlaylistAsVideo.per_item(),
            DownloadMode::VideoAsVideo
        );
        assert_eq!(
            DownloadMode::PlaylistAsAudio.per_item(),
            DownloadMode::VideoAsAudio
        );
        assert_eq!(
            DownloadMode::VideoAsAudio.per_item(),
            DownloadMode::VideoAsAudio
        );
    }

    #[test]
    fn mode_flags_match_their_variants() {
        assert!(DownloadMode::PlaylistAsAudio.is_playlist());
        assert!(DownloadMode::PlaylistAsAudio.wants_audio());
        assert!(!DownloadMode::VideoAsVideo.is_playlist());
        assert!(!DownloadMode::VideoAsVideo.wants_audio());
    }

    #[test]
    fn request_builder_fills_fields() {
        let req = DownloadRequest::new("https://example.com/watch?v=abc")
            .with_mode(DownloadMode::VideoAsVideo)
            .with_tier(QualityTier::High);
        assert_eq!(req.mode, Some(DownloadMode::VideoAsVideo));
        assert_eq!(req.tier, QualityTier::High);
    }

    #[test]
    fn tier_labels_are_exact_for_low_and_medium_only() {
        assert_eq!(QualityTier::Low.exact_label(), Some("360p"));
        assert_eq!(QualityTier::Medium.exact_label(), Some("720p"));
        assert_eq!(QualityTier::High.exact_label(), None);
    }
}

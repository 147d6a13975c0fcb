// QualitySelector - tier-to-stream selection policy
//
// Maps a requested quality tier plus a resolved stream list to exactly one
// descriptor, or a typed failure. Handles:
// - Exact tier matching (360p / 720p progressive mp4, no substitution)
// - Best combined stream detection for the high tier
// - Audio-only track selection for audio modes
//
// Pure policy over descriptors already in hand; never touches the network.

use super::errors::EngineError;
use super::models::{QualityTier, StreamDescriptor};

/// Stream selection policy
pub struct QualitySelector;

impl QualitySelector {
    /// Pick the one stream a tier demands.
    ///
    /// Low and medium require an exact {label, video/mp4, progressive}
    /// match. High takes the maximum-resolution combined stream; on equal
    /// heights the one the provider listed first wins. Absence of a match
    /// is a failure, never a fallback to another tier.
    pub fn select(
        streams: &[StreamDescriptor],
        tier: QualityTier,
    ) -> Result<&StreamDescriptor, EngineError> {
        match tier.exact_label() {
            Some(label) => Self::find_exact(streams, label).ok_or_else(|| {
                EngineError::QualityUnavailable(format!("{} progressive mp4", label))
            }),
            None => Self::find_highest(streams).ok_or_else(|| {
                EngineError::QualityUnavailable("any combined video stream".to_string())
            }),
        }
    }

    /// Pick the audio-only track for audio modes: the first audio-only
    /// stream in an mp4 audio container, in provider order. No tier
    /// applies here.
    pub fn select_audio(streams: &[StreamDescriptor]) -> Result<&StreamDescriptor, EngineError> {
        streams
            .iter()
            .find(|s| s.is_audio_only && s.mime_type == "audio/mp4")
            .ok_or_else(|| {
                EngineError::QualityUnavailable("audio-only audio/mp4 track".to_string())
            })
    }

    fn find_exact<'a>(
        streams: &'a [StreamDescriptor],
        label: &str,
    ) -> Option<&'a StreamDescriptor> {
        streams.iter().find(|s| {
            s.resolution.as_deref() == Some(label)
                && s.mime_type == "video/mp4"
                && s.is_progressive
                && !s.is_audio_only
        })
    }

    /// First maximum wins: the provider's ordering is authoritative on
    /// ties, so a strict comparison keeps the earlier descriptor.
    fn find_highest(streams: &[StreamDescriptor]) -> Option<&StreamDescriptor> {
        let mut best: Option<(&StreamDescriptor, u32)> = None;
        for stream in streams {
            if stream.is_audio_only || !stream.is_progressive {
                continue;
            }
            let height = match stream.resolution_height() {
                Some(h) => h,
                None => continue,
            };
            match best {
                Some((_, best_height)) if height <= best_height => {}
                _ => best = Some((stream, height)),
            }
        }
        best.map(|(stream, _)| stream)
    }
}

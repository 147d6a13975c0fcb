// DownloadJob - single-item acquisition pipeline
//
// Resolve, select, transfer, optionally transcode. One job per item;
// failure at any step aborts the job and surfaces the typed error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::catalog::StreamCatalog;
use super::errors::EngineError;
use super::models::{DownloadMode, DownloadResult, QualityTier, StreamDescriptor};
use super::selector::QualitySelector;
use super::traits::AudioTranscoder;
use super::utils::{format_duration, safe_filename};

pub struct DownloadJob {
    catalog: StreamCatalog,
    transcoder: Arc<dyn AudioTranscoder>,
}

impl DownloadJob {
    pub fn new(catalog: StreamCatalog, transcoder: Arc<dyn AudioTranscoder>) -> Self {
        Self {
            catalog,
            transcoder,
        }
    }

    /// Download one item into `destination`.
    ///
    /// Video modes save the tier-selected stream as
    /// `(<resolution>) <provider filename>`. Audio modes save the
    /// audio-only track as `(mp3) <provider filename>`, transcode it, and
    /// remove the intermediate container. A file left behind by a failed
    /// transfer or transcode stays where it is.
    pub async fn run(
        &self,
        reference: &str,
        mode: DownloadMode,
        tier: QualityTier,
        destination: &Path,
    ) -> Result<DownloadResult, EngineError> {
        let info = self.catalog.resolve_video(reference).await?;
        info!(title = %info.title, audio = mode.wants_audio(), "starting download");

        fs::create_dir_all(destination).await?;

        if mode.wants_audio() {
            let stream = QualitySelector::select_audio(&info.streams)?;
            let saved = self
                .save_stream(reference, stream, destination, &audio_filename(stream))
                .await?;
            let transcoded = self.transcoder.extract_audio(&saved).await?;
            fs::remove_file(&saved).await?;
            info!(path = %transcoded.display(), "audio track ready");
        } else {
            let stream = QualitySelector::select(&info.streams, tier)?;
            let saved = self
                .save_stream(reference, stream, destination, &video_filename(stream))
                .await?;
            info!(path = %saved.display(), "video ready");
        }

        Ok(DownloadResult {
            title: info.title,
            length: format_duration(info.duration_seconds),
            thumbnail_url: info.thumbnail_url,
        })
    }

    /// Chunked copy of the provider's byte source into `destination/name`
    async fn save_stream(
        &self,
        reference: &str,
        stream: &StreamDescriptor,
        destination: &Path,
        name: &str,
    ) -> Result<PathBuf, EngineError> {
        let path = destination.join(name);
        let mut source = self.catalog.open_stream(reference, stream).await?;
        let mut file = fs::File::create(&path).await?;

        let mut written: u64 = 0;
        while let Some(chunk) = source.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(path = %path.display(), bytes = written, "stream saved");
        Ok(path)
    }
}

/// `(<resolution>) <provider filename>`; the prefix keeps repeated
/// downloads of one title at different qualities apart.
fn video_filename(stream: &StreamDescriptor) -> String {
    let label = stream.resolution.as_deref().unwrap_or("video");
    format!("({}) {}", label, safe_filename(&stream.default_filename))
}

fn audio_filename(stream: &StreamDescriptor) -> String {
    format!("(mp3) {}", safe_filename(&stream.default_filename))
}

// DownloadEngine - the single entry point hosts call

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{info, warn};

use super::batch::PlaylistBatch;
use super::catalog::StreamCatalog;
use super::errors::EngineError;
use super::job::DownloadJob;
use super::models::{DownloadRequest, DownloadResult, EngineConfig};
use super::traits::{AudioTranscoder, StreamProvider};

/// Dispatches one request to a single-item job or a playlist batch.
///
/// Holds the injected provider and transcoder; per-request pipeline
/// pieces are built fresh for every submission and dropped afterwards.
#[derive(Clone)]
pub struct DownloadEngine {
    provider: Arc<dyn StreamProvider>,
    transcoder: Arc<dyn AudioTranscoder>,
    config: EngineConfig,
}

impl DownloadEngine {
    pub fn new(
        provider: Arc<dyn StreamProvider>,
        transcoder: Arc<dyn AudioTranscoder>,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            transcoder,
            config,
        }
    }

    /// Engine wired to the system `yt-dlp` and `ffmpeg` binaries
    pub fn with_system_tools(config: EngineConfig) -> Self {
        Self::new(
            Arc::new(crate::ytdlp::YtDlpProvider::new(Default::default())),
            Arc::new(crate::ffmpeg::FfmpegTranscoder::new()),
            config,
        )
    }

    /// Run one request to completion. A request without a mode is
    /// rejected before anything touches the network.
    pub async fn submit(&self, request: DownloadRequest) -> Result<DownloadResult, EngineError> {
        let mode = request.mode.ok_or(EngineError::NoModeSelected)?;
        info!(
            reference = %request.reference,
            mode = ?mode,
            tier = %request.tier,
            "request accepted"
        );

        let catalog = StreamCatalog::new(self.provider.clone());
        let job = DownloadJob::new(catalog.clone(), self.transcoder.clone());

        if mode.is_playlist() {
            let batch = PlaylistBatch::new(catalog, job, self.config.download_dir.clone());
            batch.run(&request.reference, mode, request.tier).await
        } else {
            job.run(
                &request.reference,
                mode,
                request.tier,
                &self.config.download_dir,
            )
            .await
        }
    }

    /// Run one request on a spawned task and deliver the outcome on a
    /// completion channel. The caller decides how to marshal the result
    /// onto its own thread.
    pub fn submit_background(
        &self,
        request: DownloadRequest,
    ) -> oneshot::Receiver<Result<DownloadResult, EngineError>> {
        let (tx, rx) = oneshot::channel();
        let engine = self.clone();
        tokio::spawn(async move {
            let result = engine.submit(request).await;
            let _ = tx.send(result);
        });
        rx
    }

    /// Best-effort provider self-update, meant for process start.
    /// Failure is logged and dropped; it never aborts anything.
    pub async fn refresh_provider(&self) {
        if let Err(e) = self.provider.refresh().await {
            warn!(
                provider = self.provider.name(),
                error = %e,
                "provider refresh failed"
            );
        }
    }
}

// StreamCatalog - engine-side view of the metadata provider

use std::sync::Arc;

use tracing::debug;

use super::errors::EngineError;
use super::models::{PlaylistInfo, StreamDescriptor, VideoInfo};
use super::traits::{ByteStream, StreamProvider};

/// Wraps the injected provider and enforces the engine's resolution
/// contract on top of it: blank references are rejected before any
/// provider call, and a playlist resolves to a non-empty item list or
/// fails. One resolution attempt per call, no retries.
#[derive(Clone)]
pub struct StreamCatalog {
    provider: Arc<dyn StreamProvider>,
}

impl StreamCatalog {
    pub fn new(provider: Arc<dyn StreamProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve_video(&self, reference: &str) -> Result<VideoInfo, EngineError> {
        let reference = Self::checked(reference)?;
        let info = self.provider.resolve_video(reference).await?;
        debug!(
            provider = self.provider.name(),
            title = %info.title,
            streams = info.streams.len(),
            "resolved video"
        );
        Ok(info)
    }

    pub async fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, EngineError> {
        let reference = Self::checked(reference)?;
        let info = self.provider.resolve_playlist(reference).await?;
        if info.items.is_empty() {
            return Err(EngineError::ContentUnavailable(format!(
                "playlist '{}' has no items",
                info.title
            )));
        }
        debug!(
            provider = self.provider.name(),
            title = %info.title,
            items = info.items.len(),
            "resolved playlist"
        );
        Ok(info)
    }

    pub async fn open_stream(
        &self,
        reference: &str,
        stream: &StreamDescriptor,
    ) -> Result<ByteStream, EngineError> {
        self.provider.open_stream(reference, stream).await
    }

    fn checked(reference: &str) -> Result<&str, EngineError> {
        if reference.trim().is_empty() {
            return Err(EngineError::ReferenceInvalid(
                "empty content reference".to_string(),
            ));
        }
        Ok(reference)
    }
}

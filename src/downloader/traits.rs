// Injected provider and transcoder trait definitions

use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use super::errors::EngineError;
use super::models::{PlaylistInfo, StreamDescriptor, VideoInfo};

/// Byte source for one stream, delivered in chunks
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, EngineError>> + Send>>;

/// Trait for the external metadata/stream-resolution capability.
///
/// One resolution attempt per call; no retries here. Transient provider
/// errors surface to the caller unmodified.
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Name of the provider (for logging)
    fn name(&self) -> &'static str;

    /// Resolve a single-item reference to its metadata and streams
    async fn resolve_video(&self, reference: &str) -> Result<VideoInfo, EngineError>;

    /// Resolve a playlist reference to its metadata and ordered items
    async fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, EngineError>;

    /// Open the byte source for one of the streams a resolve returned
    async fn open_stream(
        &self,
        reference: &str,
        stream: &StreamDescriptor,
    ) -> Result<ByteStream, EngineError>;

    /// Refresh the provider capability itself (self-update). Best effort;
    /// callers are expected to log and ignore a failure.
    async fn refresh(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Trait for the external audio extraction capability
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Name of the transcoder (for logging)
    fn name(&self) -> &'static str;

    /// Convert a downloaded container into a standalone audio file next to
    /// it and return the new path. The source file is left in place; the
    /// caller decides when to remove it.
    async fn extract_audio(&self, source: &Path) -> Result<PathBuf, EngineError>;
}

// Scripted doubles for the provider and transcoder seams.
// Test-only; compiled via the cfg(test) declaration in mod.rs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use super::errors::EngineError;
use super::models::{PlaylistInfo, StreamDescriptor, VideoInfo};
use super::traits::{AudioTranscoder, ByteStream, StreamProvider};

pub fn make_stream(
    id: &str,
    resolution: Option<&str>,
    mime: &str,
    audio_only: bool,
    progressive: bool,
    filename: &str,
) -> StreamDescriptor {
    StreamDescriptor {
        format_id: id.to_string(),
        resolution: resolution.map(String::from),
        mime_type: mime.to_string(),
        is_audio_only: audio_only,
        is_progressive: progressive,
        default_filename: filename.to_string(),
    }
}

/// A video with the usual ladder: 360p and 720p progressive mp4, a
/// non-progressive 1080p, and one audio-only mp4 track.
pub fn make_video(title: &str, duration_seconds: u64) -> VideoInfo {
    let filename = format!("{}.mp4", title);
    make_video_with_streams(
        title,
        duration_seconds,
        vec![
            make_stream("18", Some("360p"), "video/mp4", false, true, &filename),
            make_stream("22", Some("720p"), "video/mp4", false, true, &filename),
            make_stream("137", Some("1080p"), "video/mp4", false, false, &filename),
            make_stream("140", None, "audio/mp4", true, false, &filename),
        ],
    )
}

pub fn make_video_with_streams(
    title: &str,
    duration_seconds: u64,
    streams: Vec<StreamDescriptor>,
) -> VideoInfo {
    VideoInfo {
        title: title.to_string(),
        duration_seconds,
        thumbnail_url: format!(
            "https://thumbs.example/{}.jpg",
            title.to_lowercase().replace(' ', "-")
        ),
        streams,
    }
}

pub fn make_playlist(title: &str, items: &[&str]) -> PlaylistInfo {
    PlaylistInfo {
        title: title.to_string(),
        thumbnail_url: format!(
            "https://thumbs.example/{}.jpg",
            title.to_lowercase().replace(' ', "-")
        ),
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

/// In-memory provider scripted per reference. Records every call it
/// receives so tests can assert what was and was not asked of it.
pub struct FakeProvider {
    videos: HashMap<String, VideoInfo>,
    playlists: HashMap<String, PlaylistInfo>,
    failures: HashMap<String, EngineError>,
    stream_failures: HashMap<String, EngineError>,
    payload: Bytes,
    refresh_error: Option<EngineError>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            videos: HashMap::new(),
            playlists: HashMap::new(),
            failures: HashMap::new(),
            stream_failures: HashMap::new(),
            payload: Bytes::from_static(b"media-bytes-0123456789"),
            refresh_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_video(mut self, reference: &str, info: VideoInfo) -> Self {
        self.videos.insert(reference.to_string(), info);
        self
    }

    pub fn with_playlist(mut self, reference: &str, info: PlaylistInfo) -> Self {
        self.playlists.insert(reference.to_string(), info);
        self
    }

    /// Any resolve or open against `reference` fails with `error`
    pub fn failing_with(mut self, reference: &str, error: EngineError) -> Self {
        self.failures.insert(reference.to_string(), error);
        self
    }

    /// Resolution succeeds but the byte stream for `reference` yields one
    /// chunk and then fails with `error`
    pub fn failing_stream_with(mut self, reference: &str, error: EngineError) -> Self {
        self.stream_failures.insert(reference.to_string(), error);
        self
    }

    pub fn failing_refresh(mut self, error: EngineError) -> Self {
        self.refresh_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_failure(&self, reference: &str) -> Option<EngineError> {
        self.failures.get(reference).cloned()
    }
}

#[async_trait]
impl StreamProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn resolve_video(&self, reference: &str) -> Result<VideoInfo, EngineError> {
        self.record(format!("resolve_video:{}", reference));
        if let Some(err) = self.scripted_failure(reference) {
            return Err(err);
        }
        self.videos.get(reference).cloned().ok_or_else(|| {
            EngineError::ContentUnavailable(format!("no scripted video for {}", reference))
        })
    }

    async fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, EngineError> {
        self.record(format!("resolve_playlist:{}", reference));
        if let Some(err) = self.scripted_failure(reference) {
            return Err(err);
        }
        self.playlists.get(reference).cloned().ok_or_else(|| {
            EngineError::ContentUnavailable(format!("no scripted playlist for {}", reference))
        })
    }

    async fn open_stream(
        &self,
        reference: &str,
        stream: &StreamDescriptor,
    ) -> Result<ByteStream, EngineError> {
        self.record(format!("open_stream:{}", stream.format_id));
        if let Some(err) = self.scripted_failure(reference) {
            return Err(err);
        }
        if let Some(err) = self.stream_failures.get(reference).cloned() {
            let first = self.payload.slice(0..self.payload.len().min(4));
            return Ok(Box::pin(stream::iter(vec![Ok(first), Err(err)])));
        }
        let chunks: Vec<Result<Bytes, EngineError>> = self
            .payload
            .chunks(4)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn refresh(&self) -> Result<(), EngineError> {
        self.record("refresh".to_string());
        match &self.refresh_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Transcoder double: writes a small file with the mp3 extension next to
/// the source, or fails when scripted to.
pub struct FakeTranscoder {
    fail: bool,
    calls: Mutex<Vec<PathBuf>>,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioTranscoder for FakeTranscoder {
    fn name(&self) -> &'static str {
        "fake-transcoder"
    }

    async fn extract_audio(&self, source: &Path) -> Result<PathBuf, EngineError> {
        self.calls.lock().unwrap().push(source.to_path_buf());
        if self.fail {
            return Err(EngineError::TranscodeFailed(format!(
                "scripted failure for {}",
                source.display()
            )));
        }
        let output = source.with_extension("mp3");
        tokio::fs::write(&output, b"transcoded-audio").await?;
        Ok(output)
    }
}

// tubefetch - media acquisition and conversion orchestration engine
//
// Resolves a content reference to its streams, picks one by quality
// policy, downloads it, optionally extracts audio, and repeats the whole
// sequence across playlists. Hosts drive everything through
// DownloadEngine; the interface layer itself lives elsewhere.

pub mod downloader;
pub mod ffmpeg;
pub mod logging;
pub mod ytdlp;

pub use downloader::{
    AudioTranscoder, ByteStream, DownloadEngine, DownloadMode, DownloadRequest, DownloadResult,
    EngineConfig, EngineError, PlaylistInfo, QualityTier, StreamDescriptor, StreamProvider,
    VideoInfo,
};
pub use ffmpeg::FfmpegTranscoder;
pub use ytdlp::{YtDlpConfig, YtDlpProvider};

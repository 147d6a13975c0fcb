// Downloader module - the acquisition and conversion engine

pub mod batch;
pub mod catalog;
pub mod errors;
pub mod job;
pub mod models;
pub mod orchestrator;
pub mod selector;
pub mod traits;
pub mod utils;

#[cfg(test)]
pub mod testkit;

pub use batch::PlaylistBatch;
pub use catalog::StreamCatalog;
pub use errors::EngineError;
pub use job::DownloadJob;
pub use models::{
    DownloadMode, DownloadRequest, DownloadResult, EngineConfig, PlaylistInfo, QualityTier,
    StreamDescriptor, VideoInfo,
};
pub use orchestrator::DownloadEngine;
pub use selector::QualitySelector;
pub use traits::{AudioTranscoder, ByteStream, StreamProvider};

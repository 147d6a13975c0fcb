// FfmpegTranscoder - AudioTranscoder over the system ffmpeg binary

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use async_trait::async_trait;
use tracing::debug;

use crate::downloader::errors::EngineError;
use crate::downloader::traits::AudioTranscoder;
use crate::downloader::utils::run_output_with_timeout;

/// Long tracks take a while; the bound only catches a hung binary
const TRANSCODE_TIMEOUT_SECS: u64 = 600;

pub struct FfmpegTranscoder {
    ffmpeg_path: String,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self {
            ffmpeg_path: Self::find_ffmpeg(),
        }
    }

    /// Find the ffmpeg binary
    fn find_ffmpeg() -> String {
        let common_paths = vec![
            "/opt/homebrew/bin/ffmpeg", // Homebrew on Apple Silicon
            "/usr/local/bin/ffmpeg",    // Homebrew on Intel Mac
            "/usr/bin/ffmpeg",          // System installation
            "ffmpeg",                   // In PATH
        ];

        for path in common_paths {
            if std::path::Path::new(path).exists() {
                return path.to_string();
            }
        }

        // Try to find via `which`
        if let Ok(output) = StdCommand::new("which").arg("ffmpeg").output() {
            if output.status.success() {
                if let Ok(path) = String::from_utf8(output.stdout) {
                    let trimmed = path.trim();
                    if !trimmed.is_empty() {
                        return trimmed.to_string();
                    }
                }
            }
        }

        "ffmpeg".to_string()
    }

    /// Check if the ffmpeg binary responds
    fn is_available(&self) -> bool {
        match StdCommand::new(&self.ffmpeg_path).arg("-version").output() {
            Ok(out) => out.status.success(),
            Err(_) => false,
        }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

fn mp3_target(source: &Path) -> PathBuf {
    source.with_extension("mp3")
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    async fn extract_audio(&self, source: &Path) -> Result<PathBuf, EngineError> {
        if !self.is_available() {
            return Err(EngineError::TranscodeFailed(
                "ffmpeg binary not found".to_string(),
            ));
        }

        let target = mp3_target(source);
        let args = vec![
            "-y".to_string(),
            "-i".to_string(),
            source.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-acodec".to_string(),
            "libmp3lame".to_string(),
            target.to_string_lossy().to_string(),
        ];

        debug!(source = %source.display(), "extracting audio track");
        let output = run_output_with_timeout(&self.ffmpeg_path, args, TRANSCODE_TIMEOUT_SECS)
            .await
            .map_err(|e| match e {
                EngineError::Unclassified(msg) => EngineError::TranscodeFailed(msg),
                other => other,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("ffmpeg failed")
                .trim();
            return Err(EngineError::TranscodeFailed(reason.to_string()));
        }

        Ok(target)
    }
}

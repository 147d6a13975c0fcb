// YtDlpProvider - StreamProvider over the system yt-dlp binary

use std::process::Command as StdCommand;

use async_trait::async_trait;
use futures::StreamExt;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::diagnostics::classify_stderr;
use super::parse;
use crate::downloader::errors::EngineError;
use crate::downloader::models::{PlaylistInfo, StreamDescriptor, VideoInfo};
use crate::downloader::traits::{ByteStream, StreamProvider};
use crate::downloader::utils::run_output_with_timeout;

/// Bound on one metadata or direct-URL subprocess run
const RESOLVE_TIMEOUT_SECS: u64 = 60;
/// Self-update can pull a release; give it room
const REFRESH_TIMEOUT_SECS: u64 = 180;

lazy_static! {
    static ref URL_SHAPE: Regex = Regex::new(r"^https?://\S+$").unwrap();
}

/// Network knobs passed through to the binary
#[derive(Debug, Clone)]
pub struct YtDlpConfig {
    /// Proxy URL, e.g. "socks5://127.0.0.1:1080"
    pub proxy: Option<String>,
    /// Socket timeout in seconds handed to --socket-timeout
    pub socket_timeout_secs: u32,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            socket_timeout_secs: 30,
        }
    }
}

impl YtDlpConfig {
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_socket_timeout(mut self, seconds: u32) -> Self {
        self.socket_timeout_secs = seconds;
        self
    }
}

pub struct YtDlpProvider {
    ytdlp_path: String,
    config: YtDlpConfig,
}

impl YtDlpProvider {
    pub fn new(config: YtDlpConfig) -> Self {
        Self {
            ytdlp_path: Self::find_ytdlp(),
            config,
        }
    }

    /// Find the yt-dlp binary
    fn find_ytdlp() -> String {
        let common_paths = vec![
            "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
            "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
            "/usr/bin/yt-dlp",          // System installation
            "yt-dlp",                   // In PATH
        ];

        for path in common_paths {
            if std::path::Path::new(path).exists() {
                return path.to_string();
            }
        }

        // Try to find via `which`
        if let Ok(output) = StdCommand::new("which").arg("yt-dlp").output() {
            if output.status.success() {
                if let Ok(path) = String::from_utf8(output.stdout) {
                    let trimmed = path.trim();
                    if !trimmed.is_empty() {
                        return trimmed.to_string();
                    }
                }
            }
        }

        "yt-dlp".to_string()
    }

    /// Check if the yt-dlp binary responds
    fn is_available(&self) -> bool {
        match StdCommand::new(&self.ytdlp_path).arg("--version").output() {
            Ok(out) => out.status.success(),
            Err(_) => false,
        }
    }

    /// Reject references the binary would choke on, then make sure the
    /// binary itself is reachable. Shape first: a bad locator is the
    /// caller's mistake even on a machine without yt-dlp.
    fn ensure_ready(&self, reference: &str) -> Result<(), EngineError> {
        if !URL_SHAPE.is_match(reference) {
            return Err(EngineError::ReferenceInvalid(format!(
                "not a recognizable locator: {}",
                reference
            )));
        }
        if !self.is_available() {
            return Err(EngineError::Unclassified(
                "yt-dlp binary not found".to_string(),
            ));
        }
        Ok(())
    }

    fn network_args(&self) -> Vec<String> {
        let mut args = vec![
            "--socket-timeout".to_string(),
            self.config.socket_timeout_secs.to_string(),
        ];
        if let Some(proxy) = &self.config.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }
        args
    }

    async fn run_checked(&self, args: Vec<String>) -> Result<std::process::Output, EngineError> {
        let output = run_output_with_timeout(&self.ytdlp_path, args, RESOLVE_TIMEOUT_SECS).await?;
        if !output.status.success() {
            return Err(classify_stderr(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(output)
    }

    /// Ask the binary for the direct media URL of one format
    async fn direct_url(
        &self,
        reference: &str,
        stream: &StreamDescriptor,
    ) -> Result<String, EngineError> {
        let mut args = vec![
            "-g".to_string(),
            "-f".to_string(),
            stream.format_id.clone(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
        ];
        args.extend(self.network_args());
        args.push(reference.to_string());

        let output = self.run_checked(args).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let url = stdout.lines().next().unwrap_or("").trim().to_string();
        if url.is_empty() {
            return Err(EngineError::Unclassified(
                "yt-dlp returned no direct URL".to_string(),
            ));
        }
        Ok(url)
    }

    fn http_client(&self) -> Result<reqwest::Client, EngineError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(std::time::Duration::from_secs(
                self.config.socket_timeout_secs as u64,
            ));
        if let Some(proxy_url) = &self.config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                EngineError::Unclassified(format!("invalid proxy URL {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }
        builder
            .build()
            .map_err(|e| EngineError::Unclassified(format!("HTTP client build failed: {}", e)))
    }
}

impl Default for YtDlpProvider {
    fn default() -> Self {
        Self::new(YtDlpConfig::default())
    }
}

#[async_trait]
impl StreamProvider for YtDlpProvider {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn resolve_video(&self, reference: &str) -> Result<VideoInfo, EngineError> {
        self.ensure_ready(reference)?;

        let mut args = vec![
            "--dump-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
        ];
        args.extend(self.network_args());
        args.push(reference.to_string());

        let output = self.run_checked(args).await?;
        parse::parse_video(&output.stdout)
    }

    async fn resolve_playlist(&self, reference: &str) -> Result<PlaylistInfo, EngineError> {
        self.ensure_ready(reference)?;

        let mut args = vec![
            "--dump-single-json".to_string(),
            "--flat-playlist".to_string(),
            "--no-warnings".to_string(),
        ];
        args.extend(self.network_args());
        args.push(reference.to_string());

        let output = self.run_checked(args).await?;
        parse::parse_playlist(&output.stdout)
    }

    async fn open_stream(
        &self,
        reference: &str,
        stream: &StreamDescriptor,
    ) -> Result<ByteStream, EngineError> {
        self.ensure_ready(reference)?;

        let url = self.direct_url(reference, stream).await?;
        debug!(format_id = %stream.format_id, "opening direct media URL");

        let response = self
            .http_client()?
            .get(&url)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(EngineError::from));
        Ok(Box::pin(bytes))
    }

    async fn refresh(&self) -> Result<(), EngineError> {
        let output =
            run_output_with_timeout(&self.ytdlp_path, vec!["-U".to_string()], REFRESH_TIMEOUT_SECS)
                .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::Unclassified(format!(
                "yt-dlp self-update failed: {}",
                stderr.lines().next().unwrap_or("unknown error").trim()
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(
            status = stdout.lines().next().unwrap_or("").trim(),
            "yt-dlp self-update"
        );
        Ok(())
    }
}

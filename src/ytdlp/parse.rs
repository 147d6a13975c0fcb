// Maps yt-dlp JSON dumps to the engine's data model

use crate::downloader::errors::EngineError;
use crate::downloader::models::{PlaylistInfo, StreamDescriptor, VideoInfo};

/// Parse `--dump-json` output for a single video.
///
/// Formats carrying neither audio nor video (storyboards, preview
/// images) are dropped; everything else becomes a descriptor.
pub fn parse_video(stdout: &[u8]) -> Result<VideoInfo, EngineError> {
    let json_str = String::from_utf8_lossy(stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| EngineError::Unclassified(format!("invalid yt-dlp JSON: {}", e)))?;

    let title = json["title"].as_str().unwrap_or("Unknown").to_string();
    let formats_array = json["formats"]
        .as_array()
        .ok_or_else(|| EngineError::Unclassified("no formats in yt-dlp output".to_string()))?;

    let mut streams = Vec::new();
    for f in formats_array {
        let vcodec = f["vcodec"].as_str().unwrap_or("none");
        let acodec = f["acodec"].as_str().unwrap_or("none");
        let has_video = vcodec != "none" && !vcodec.is_empty();
        let has_audio = acodec != "none" && !acodec.is_empty();
        if !has_video && !has_audio {
            continue;
        }

        let ext = f["ext"].as_str().unwrap_or("mp4");
        let audio_only = has_audio && !has_video;

        streams.push(StreamDescriptor {
            format_id: f["format_id"].as_str().unwrap_or("").to_string(),
            resolution: f["height"].as_u64().map(|h| format!("{}p", h)),
            mime_type: mime_for(ext, audio_only),
            is_audio_only: audio_only,
            is_progressive: has_video && has_audio,
            default_filename: format!("{}.{}", title, ext),
        });
    }

    Ok(VideoInfo {
        title,
        duration_seconds: json["duration"].as_f64().unwrap_or(0.0) as u64,
        thumbnail_url: json["thumbnail"].as_str().unwrap_or("").to_string(),
        streams,
    })
}

/// Parse `--dump-single-json --flat-playlist` output.
///
/// Item references come from each entry's `url`, falling back to its
/// bare `id` (yt-dlp resolves either form).
pub fn parse_playlist(stdout: &[u8]) -> Result<PlaylistInfo, EngineError> {
    let json_str = String::from_utf8_lossy(stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| EngineError::Unclassified(format!("invalid yt-dlp JSON: {}", e)))?;

    let entries = json["entries"].as_array().ok_or_else(|| {
        EngineError::Unclassified("no entries in yt-dlp playlist output".to_string())
    })?;

    let items: Vec<String> = entries
        .iter()
        .filter_map(|e| {
            e["url"]
                .as_str()
                .map(String::from)
                .or_else(|| e["id"].as_str().map(String::from))
        })
        .collect();

    let thumbnail_url = json["thumbnails"]
        .as_array()
        .and_then(|thumbs| thumbs.last())
        .and_then(|t| t["url"].as_str())
        .unwrap_or("")
        .to_string();

    Ok(PlaylistInfo {
        title: json["title"].as_str().unwrap_or("Unknown").to_string(),
        thumbnail_url,
        items,
    })
}

fn mime_for(ext: &str, audio_only: bool) -> String {
    if audio_only {
        match ext {
            "m4a" | "mp4" => "audio/mp4".to_string(),
            other => format!("audio/{}", other),
        }
    } else {
        match ext {
            "mp4" => "video/mp4".to_string(),
            other => format!("video/{}", other),
        }
    }
}

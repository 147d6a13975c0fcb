// Maps yt-dlp stderr to the engine error taxonomy
//
// Checks patterns in order of specificity: age gate, reference shape,
// then the various unavailability wordings. Anything unrecognized is
// Unclassified with a trimmed excerpt for the logs.

use crate::downloader::errors::EngineError;

pub fn classify_stderr(stderr: &str) -> EngineError {
    let lower = stderr.to_lowercase();
    let excerpt = error_excerpt(stderr);

    if lower.contains("sign in to confirm your age")
        || lower.contains("age-restricted")
        || lower.contains("age_verification")
    {
        return EngineError::AgeRestricted(excerpt);
    }

    if lower.contains("unsupported url")
        || lower.contains("is not a valid url")
        || lower.contains("invalid url")
    {
        return EngineError::ReferenceInvalid(excerpt);
    }

    if lower.contains("video unavailable")
        || lower.contains("is no longer available")
        || lower.contains("has been removed")
        || lower.contains("private video")
        || lower.contains("video is private")
        || lower.contains("available in your country")
        || lower.contains("blocked in your country")
    {
        return EngineError::ContentUnavailable(excerpt);
    }

    EngineError::Unclassified(excerpt)
}

/// First ERROR line of the stderr dump, or its first line at all
fn error_excerpt(stderr: &str) -> String {
    stderr
        .lines()
        .find(|line| line.trim_start().to_lowercase().starts_with("error"))
        .or_else(|| stderr.lines().next())
        .unwrap_or("yt-dlp failed")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_gate_detection() {
        let stderr = "ERROR: [youtube] dQw4w9WgXcQ: Sign in to confirm your age";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::AgeRestricted(_)
        ));
    }

    #[test]
    fn test_unavailable_detection() {
        let stderr = "ERROR: [youtube] abc123: Video unavailable";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::ContentUnavailable(_)
        ));
    }

    #[test]
    fn test_private_video_detection() {
        let stderr = "ERROR: [youtube] abc123: Private video. Sign in if you've been granted access";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::ContentUnavailable(_)
        ));
    }

    #[test]
    fn test_geo_block_detection() {
        let stderr = "ERROR: [youtube] abc123: The uploader has not made this video available in your country";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::ContentUnavailable(_)
        ));
    }

    #[test]
    fn test_unsupported_url_detection() {
        let stderr = "ERROR: Unsupported URL: https://example.com/watch";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::ReferenceInvalid(_)
        ));
    }

    #[test]
    fn test_invalid_url_detection() {
        let stderr = "ERROR: 'not-a-link' is not a valid URL";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::ReferenceInvalid(_)
        ));
    }

    #[test]
    fn test_fallthrough_is_unclassified() {
        let stderr = "ERROR: unable to download webpage: HTTP Error 500";
        assert!(matches!(
            classify_stderr(stderr),
            EngineError::Unclassified(_)
        ));
    }

    #[test]
    fn test_excerpt_picks_the_error_line() {
        let stderr = "WARNING: some noise first\nERROR: Video unavailable\nmore noise";
        match classify_stderr(stderr) {
            EngineError::ContentUnavailable(msg) => {
                assert_eq!(msg, "ERROR: Video unavailable");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_empty_stderr_still_yields_a_message() {
        match classify_stderr("") {
            EngineError::Unclassified(msg) => assert_eq!(msg, "yt-dlp failed"),
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}

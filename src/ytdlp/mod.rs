// yt-dlp backed StreamProvider
//
// Thin subprocess orchestration over the system yt-dlp binary: metadata
// via --dump-json, playlists via a flat dump, stream bytes via a resolved
// direct URL fetched over HTTP. The binary stays replaceable behind the
// StreamProvider trait.

mod diagnostics;
mod parse;
mod provider;

pub use provider::{YtDlpConfig, YtDlpProvider};

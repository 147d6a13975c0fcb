// PlaylistBatch - ordered, all-or-nothing playlist processing

use std::path::PathBuf;

use tokio::fs;
use tracing::info;

use super::catalog::StreamCatalog;
use super::errors::EngineError;
use super::job::DownloadJob;
use super::models::{DownloadMode, DownloadResult, QualityTier};
use super::utils::safe_filename;

pub struct PlaylistBatch {
    catalog: StreamCatalog,
    job: DownloadJob,
    download_dir: PathBuf,
}

impl PlaylistBatch {
    pub fn new(catalog: StreamCatalog, job: DownloadJob, download_dir: PathBuf) -> Self {
        Self {
            catalog,
            job,
            download_dir,
        }
    }

    /// Download every playlist item, in provider order, into one folder
    /// named `<title> (mp4)` or `<title> (mp3)` under the download area.
    ///
    /// The folder is created once and reused; re-running against an
    /// existing folder is fine. The first failing item aborts the whole
    /// batch; items finished before it stay on disk.
    pub async fn run(
        &self,
        reference: &str,
        mode: DownloadMode,
        tier: QualityTier,
    ) -> Result<DownloadResult, EngineError> {
        let info = self.catalog.resolve_playlist(reference).await?;
        let total = info.items.len();
        info!(title = %info.title, items = total, "starting playlist batch");

        let suffix = if mode.wants_audio() { "mp3" } else { "mp4" };
        let folder = self
            .download_dir
            .join(format!("{} ({})", safe_filename(&info.title), suffix));
        if !folder.exists() {
            fs::create_dir_all(&folder).await?;
        }

        for (index, item) in info.items.iter().enumerate() {
            info!(position = index + 1, total, "playlist item");
            self.job.run(item, mode.per_item(), tier, &folder).await?;
        }

        Ok(DownloadResult {
            title: info.title,
            length: total.to_string(),
            thumbnail_url: info.thumbnail_url,
        })
    }
}

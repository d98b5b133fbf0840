use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use crate::error::{HarvestError, Result};
use crate::http::Fetcher;

/// Writes artifacts into `<root>/<category>/`.
pub struct ArtifactWriter {
    root: PathBuf,
    fetcher: Arc<dyn Fetcher>,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { root: root.into(), fetcher }
    }

    async fn category_dir(&self, category: &str) -> Result<PathBuf> {
        let dir = self.root.join(category);
        fs::create_dir_all(&dir).await.map_err(|e| HarvestError::fs(&dir, e))?;
        Ok(dir)
    }

    /// Writes `text` to `<category>/<filename>`, replacing any existing file.
    pub async fn save_text(&self, text: &str, category: &str, filename: &str) -> Result<PathBuf> {
        let path = self.category_dir(category).await?.join(filename);
        fs::write(&path, text.as_bytes()).await.map_err(|e| HarvestError::fs(&path, e))?;
        info!("✅ Saved to {}", path.display());
        Ok(path)
    }

    /// Streams `url` into `<category>/<base_name>.<extension>`, or the first free
    /// `<base_name> (n).<extension>`. Never overwrites. Returns whether a file was written.
    ///
    /// A transfer that fails midway leaves the truncated file on disk.
    pub async fn download_binary(&self, url: &str, category: &str, base_name: &str, extension: &str) -> bool {
        if url.is_empty() {
            warn!("⚠️ URL not provided for {base_name}.{extension}");
            return false;
        }
        match self.try_download(url, category, base_name, extension).await {
            Ok((path, bytes)) => {
                debug!(url, bytes, "download complete");
                info!("✅ Downloaded file to {}", path.display());
                true
            }
            Err(e) => {
                error!("❌ Failed to download {url}: {e}");
                false
            }
        }
    }

    async fn try_download(&self, url: &str, category: &str, base_name: &str, extension: &str) -> Result<(PathBuf, u64)> {
        let mut body = self.fetcher.fetch_stream(url).await?;
        let dir = self.category_dir(category).await?;
        let (path, mut file) = create_unique(&dir, base_name, extension).await?;
        let mut written = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(|e| HarvestError::fs(&path, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| HarvestError::fs(&path, e))?;
        Ok((path, written))
    }
}

/// `base.ext`, then `base (1).ext`, `base (2).ext`, ...
pub fn candidate_name(base_name: &str, extension: &str, n: u32) -> String {
    if n == 0 { format!("{base_name}.{extension}") } else { format!("{base_name} ({n}).{extension}") }
}

/// Creates the first candidate that does not exist yet. `create_new` makes the
/// existence check and the creation a single step.
async fn create_unique(dir: &Path, base_name: &str, extension: &str) -> Result<(PathBuf, File)> {
    let mut n = 0u32;
    loop {
        let path = dir.join(candidate_name(base_name, extension, n));
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(HarvestError::fs(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ByteStream;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed body for every URL and counts calls.
    struct FixedFetcher {
        body: &'static [u8],
        status: Option<u16>,
        calls: AtomicUsize,
    }

    impl FixedFetcher {
        fn ok(body: &'static [u8]) -> Arc<Self> { Arc::new(Self { body, status: None, calls: AtomicUsize::new(0) }) }
        fn failing(status: u16) -> Arc<Self> { Arc::new(Self { body: b"", status: Some(status), calls: AtomicUsize::new(0) }) }
        fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl Fetcher for FixedFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(HarvestError::Status { url: url.to_string(), status }),
                None => Ok(String::from_utf8_lossy(self.body).into_owned()),
            }
        }

        async fn fetch_stream(&self, url: &str) -> Result<ByteStream> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = self.status {
                return Err(HarvestError::Status { url: url.to_string(), status });
            }
            let chunks: Vec<Result<Bytes>> = self.body.chunks(3).map(|c| Ok(Bytes::copy_from_slice(c))).collect();
            Ok(Box::pin(futures::stream::iter(chunks)))
        }
    }

    #[test]
    fn candidate_names() {
        assert_eq!(candidate_name("Song", "mp3", 0), "Song.mp3");
        assert_eq!(candidate_name("Song", "mp3", 1), "Song (1).mp3");
        assert_eq!(candidate_name("Song - Art", "jpeg", 12), "Song - Art (12).jpeg");
    }

    #[tokio::test]
    async fn empty_url_makes_no_request() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = FixedFetcher::ok(b"data");
        let writer = ArtifactWriter::new(tmp.path(), fetcher.clone());
        assert!(!writer.download_binary("", "Audio", "Song", "mp3").await);
        assert_eq!(fetcher.calls(), 0);
        assert!(!tmp.path().join("Audio").exists());
    }

    #[tokio::test]
    async fn collision_gets_numeric_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = FixedFetcher::ok(b"second body");
        let writer = ArtifactWriter::new(tmp.path(), fetcher.clone());
        std::fs::create_dir_all(tmp.path().join("Audio")).unwrap();
        std::fs::write(tmp.path().join("Audio/Song.mp3"), b"first").unwrap();

        assert!(writer.download_binary("http://cdn/a.mp3", "Audio", "Song", "mp3").await);
        assert_eq!(std::fs::read(tmp.path().join("Audio/Song.mp3")).unwrap(), b"first");
        assert_eq!(std::fs::read(tmp.path().join("Audio/Song (1).mp3")).unwrap(), b"second body");

        assert!(writer.download_binary("http://cdn/a.mp3", "Audio", "Song", "mp3").await);
        assert!(tmp.path().join("Audio/Song (2).mp3").exists());
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn bad_status_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = FixedFetcher::failing(404);
        let writer = ArtifactWriter::new(tmp.path(), fetcher.clone());
        assert!(!writer.download_binary("http://cdn/missing.mp4", "Videos", "Song", "mp4").await);
        assert_eq!(fetcher.calls(), 1);
        assert!(!tmp.path().join("Videos/Song.mp4").exists());
    }

    #[tokio::test]
    async fn save_text_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(tmp.path(), FixedFetcher::ok(b""));
        let first = writer.save_text("v1", "Lyrics", "Song - Lyrics.txt").await.unwrap();
        let second = writer.save_text("v2", "Lyrics", "Song - Lyrics.txt").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "v2");
        assert_eq!(std::fs::read_dir(tmp.path().join("Lyrics")).unwrap().count(), 1);
    }
}

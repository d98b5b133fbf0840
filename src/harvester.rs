use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::HarvestConfig;
use crate::error::{HarvestError, Result};
use crate::extract::{extract_prompt, locate_all};
use crate::http::{Fetcher, HttpClient};
use crate::render::{ChromeRenderer, PageRenderer};
use crate::sanitize::sanitize_filename;
use crate::storage::ArtifactWriter;
use crate::types::{Artifact, ArtifactSelection, MediaReference, PageRecord, RunSummary};

/// Where a single URL currently is in its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Rendering,
    Extracting,
    FetchingStaticHtml,
    LocatingMedia,
    Writing,
    Done,
}

/// Per-URL tallies, folded into the [`RunSummary`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOutcome {
    pub rendered: bool,
    pub saved: usize,
    pub missing: usize,
    pub failed: usize,
}

impl UrlOutcome {
    fn record(&mut self, result: Option<bool>) {
        match result {
            Some(true) => self.saved += 1,
            Some(false) => self.failed += 1,
            None => self.missing += 1,
        }
    }
}

/// Runs the batch: one URL at a time, render, extract, fetch static HTML,
/// locate media, write. Nothing that goes wrong for one URL stops the others.
pub struct Harvester {
    renderer: Arc<dyn PageRenderer>,
    fetcher: Arc<dyn Fetcher>,
    writer: ArtifactWriter,
    selection: ArtifactSelection,
}

impl Harvester {
    pub fn new(renderer: Arc<dyn PageRenderer>, fetcher: Arc<dyn Fetcher>, output_root: impl Into<PathBuf>, selection: ArtifactSelection) -> Self {
        let writer = ArtifactWriter::new(output_root, fetcher.clone());
        Self { renderer, fetcher, writer, selection }
    }

    /// Builds the Chromium renderer and the shared HTTP client from `config`.
    pub fn from_config(config: &HarvestConfig, selection: ArtifactSelection) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpClient::new(&config.http)?);
        let renderer: Arc<dyn PageRenderer> = Arc::new(ChromeRenderer::new(config.render.clone()));
        Ok(Self::new(renderer, fetcher, config.output.root.clone(), selection))
    }

    pub async fn run(&self, urls: &[String]) -> RunSummary {
        let mut summary = RunSummary { urls_total: urls.len(), ..Default::default() };
        if self.selection.is_empty() {
            warn!("⚠️ Nothing selected; no URLs will be processed");
            summary.urls_skipped = urls.len();
            return summary;
        }
        debug!(selection = ?self.selection.selected(), "artifact selection");

        for (i, url) in urls.iter().enumerate() {
            info!("🔄 Processing URL [{}/{}]: {url}", i + 1, urls.len());
            let outcome = self.process_url(url).await;
            if !outcome.rendered { summary.urls_skipped += 1; }
            summary.artifacts_saved += outcome.saved;
            summary.artifacts_missing += outcome.missing;
            summary.artifacts_failed += outcome.failed;
        }

        info!(
            "🏁 Done: {} URL(s), {} skipped, {} saved, {} not found, {} failed",
            summary.urls_total, summary.urls_skipped, summary.artifacts_saved, summary.artifacts_missing, summary.artifacts_failed
        );
        summary
    }

    pub async fn process_url(&self, url: &str) -> UrlOutcome {
        let mut outcome = UrlOutcome::default();

        enter(url, Stage::Rendering);
        let mut record = self.renderer.render(url).await;
        if !record.is_rendered() {
            warn!("⏭️ Skipping {url}: page could not be rendered");
            enter(url, Stage::Done);
            return outcome;
        }
        outcome.rendered = true;

        enter(url, Stage::Extracting);
        if self.selection.prompt {
            record.prompt_text = record.rendered_html.as_deref().and_then(extract_prompt);
        }

        let media = if self.selection.wants_media() { self.fetch_media_refs(url, &mut outcome).await } else { Vec::new() };

        enter(url, Stage::Writing);
        let title = sanitize_filename(&record.title);
        self.write_text_artifacts(&record, &title, &mut outcome).await;
        for reference in media {
            let result = self.download_media(url, &reference, &title).await;
            outcome.record(result);
        }

        enter(url, Stage::Done);
        outcome
    }

    /// Static fetch plus media lookup. A failed fetch counts every selected media artifact as failed.
    async fn fetch_media_refs(&self, url: &str, outcome: &mut UrlOutcome) -> Vec<MediaReference> {
        enter(url, Stage::FetchingStaticHtml);
        let static_html = match self.fetcher.fetch_text(url).await {
            Ok(html) => html,
            Err(e) => {
                error!("❌ Error fetching full HTML for media extraction from {url}: {e}");
                let wanted = [self.selection.mp4, self.selection.mp3, self.selection.image];
                outcome.failed += wanted.iter().filter(|w| **w).count();
                return Vec::new();
            }
        };

        enter(url, Stage::LocatingMedia);
        locate_all(&static_html, &self.selection)
    }

    async fn write_text_artifacts(&self, record: &PageRecord, title: &str, outcome: &mut UrlOutcome) {
        let texts = [
            (Artifact::Html, record.rendered_html.as_deref()),
            (Artifact::Lyrics, record.lyrics.as_deref()),
            (Artifact::Prompt, record.prompt_text.as_deref()),
        ];
        for (artifact, text) in texts {
            if !self.selection.contains(artifact) { continue; }
            let result = match text {
                Some(text) => Some(self.save_text(artifact, text, title).await),
                None => {
                    report_missing(artifact, &record.url);
                    None
                }
            };
            outcome.record(result);
        }
    }

    async fn save_text(&self, artifact: Artifact, text: &str, title: &str) -> bool {
        match self.writer.save_text(text, artifact.category(), &artifact.file_name(title)).await {
            Ok(_) => true,
            Err(e) => {
                error!("❌ Failed to save {}: {e}", artifact.label());
                false
            }
        }
    }

    /// `None` when the page carries no URL for this kind.
    async fn download_media(&self, page_url: &str, reference: &MediaReference, title: &str) -> Option<bool> {
        let artifact = reference.kind.artifact();
        let Some(raw) = reference.source_url.as_deref() else {
            report_missing(artifact, page_url);
            return None;
        };
        let source = match resolve_media_url(page_url, raw) {
            Ok(source) => source,
            Err(e) => {
                error!("❌ {e}");
                return Some(false);
            }
        };
        Some(self.writer.download_binary(&source, artifact.category(), &artifact.base_name(title), artifact.extension()).await)
    }
}

fn enter(url: &str, stage: Stage) { debug!(url, ?stage, "stage"); }

fn report_missing(artifact: Artifact, url: &str) {
    let e = HarvestError::PatternNotFound { what: artifact.label() };
    warn!("⚠️ {e} for: {url}");
}

/// Absolute URLs pass through untouched; anything else is joined onto the page URL.
pub fn resolve_media_url(page_url: &str, raw: &str) -> Result<String> {
    if Url::parse(raw).is_ok() {
        return Ok(raw.to_string());
    }
    let base = Url::parse(page_url).map_err(|_| HarvestError::InvalidUrl(page_url.to_string()))?;
    base.join(raw).map(String::from).map_err(|_| HarvestError::InvalidUrl(raw.to_string()))
}

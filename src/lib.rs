pub mod config;
pub mod error;
pub mod extract;
pub mod harvester;
pub mod http;
pub mod input;
pub mod logging;
pub mod render;
pub mod sanitize;
pub mod storage;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::HarvestConfig;
    pub use crate::error::HarvestError;
    pub use crate::extract::{extract_prompt, locate_media};
    pub use crate::harvester::Harvester;
    pub use crate::http::{Fetcher, HttpClient};
    pub use crate::render::{ChromeRenderer, PageRenderer};
    pub use crate::storage::ArtifactWriter;
    pub use crate::types::{Artifact, ArtifactSelection, MediaKind, MediaReference, PageRecord, RunSummary};
}

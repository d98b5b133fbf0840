//! Fallback cascades over parsed HTML.
//!
//! Each lookup is an ordered list of [`Strategy`] values; the first one that
//! yields a value wins and the rest are not run.

pub mod media;
pub mod prompt;

use scraper::{Html, Selector};
use tracing::debug;

pub use media::{locate_all, locate_media, MediaLocator};
pub use prompt::extract_prompt;

/// A named extraction step.
pub struct Strategy<T> {
    pub name: &'static str,
    pub run: fn(&Html) -> Option<T>,
}

/// Runs `strategies` in order and returns the first hit.
pub fn first_match<T>(doc: &Html, what: &str, strategies: &[Strategy<T>]) -> Option<T> {
    for s in strategies {
        if let Some(found) = (s.run)(doc) {
            debug!(what, strategy = s.name, "strategy matched");
            return Some(found);
        }
        debug!(what, strategy = s.name, "strategy yielded nothing");
    }
    None
}

/// `content` of the first element matching `sel`, if present and non-blank.
pub(crate) fn meta_content(doc: &Html, sel: &Selector) -> Option<String> {
    let content = doc.select(sel).next()?.value().attr("content")?;
    (!content.trim().is_empty()).then(|| content.to_string())
}

//! Post-JavaScript page rendering through a headless Chromium.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, error, info, warn};

use crate::config::RenderConfig;
use crate::error::{HarvestError, Result};
use crate::types::PageRecord;

const SELECTOR_POLL: Duration = Duration::from_millis(250);

/// Turns a song URL into a [`PageRecord`]. Implementations never fail outright:
/// an unreachable page comes back as [`PageRecord::unrendered`].
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> PageRecord;
}

/// Launches a fresh browser for every page and closes it before returning.
pub struct ChromeRenderer {
    config: RenderConfig,
}

/// A running browser plus the task pumping its CDP events.
struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            debug!("waiting for browser exit failed: {e}");
        }
        self.handler_task.abort();
    }
}

impl ChromeRenderer {
    pub fn new(config: RenderConfig) -> Self { Self { config } }

    async fn launch(&self) -> Result<BrowserSession> {
        let mut builder = BrowserConfig::builder().request_timeout(self.config.navigation_timeout());
        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder.build().map_err(HarvestError::BrowserLaunch)?;

        let (browser, mut handler) =
            Browser::launch(browser_config).await.map_err(|e| HarvestError::BrowserLaunch(e.to_string()))?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler error: {e}");
                }
            }
        });
        Ok(BrowserSession { browser, handler_task })
    }

    async fn navigate(&self, page: &Page, url: &str) -> Result<()> {
        let limit = self.config.navigation_timeout();
        match timeout(limit, page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(HarvestError::Navigation { url: url.to_string(), reason: e.to_string() }),
            Err(_) => Err(HarvestError::Navigation { url: url.to_string(), reason: format!("timed out after {}s", limit.as_secs()) }),
        }
    }

    /// Polls for the lyrics region until it exists or the selector timeout runs out.
    async fn wait_for_lyrics(&self, page: &Page) -> Result<String> {
        let selector = self.config.lyrics_selector.as_str();
        let deadline = Instant::now() + self.config.selector_timeout();
        loop {
            if let Ok(element) = page.find_element(selector).await {
                return Ok(text_content(&element).await);
            }
            if Instant::now() >= deadline {
                return Err(HarvestError::SelectorTimeout { selector: selector.to_string(), secs: self.config.selector_timeout_secs });
            }
            sleep(SELECTOR_POLL).await;
        }
    }

    async fn render_with(&self, browser: &Browser, url: &str) -> PageRecord {
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                error!("❌ Error opening a page for {url}: {e}");
                return PageRecord::unrendered(url);
            }
        };

        info!("⏳ Navigating to {url}...");
        if let Err(e) = self.navigate(&page, url).await {
            error!("❌ Error navigating to {url}: {e}");
            return PageRecord::unrendered(url);
        }

        let lyrics = match self.wait_for_lyrics(&page).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!("❌ Error extracting lyrics from {url}: {e}");
                None
            }
        };

        let title = page.get_title().await.unwrap_or_else(|e| {
            warn!("could not read title of {url}: {e}");
            None
        });
        let html = match page.content().await {
            Ok(html) => Some(html),
            Err(e) => {
                error!("❌ Error reading rendered HTML of {url}: {e}");
                None
            }
        };
        PageRecord::new(url, title, lyrics, html)
    }
}

/// DOM `textContent`, which includes hidden nodes and keeps source whitespace.
async fn text_content(element: &Element) -> String {
    match element.call_js_fn("function() { return this.textContent; }", false).await {
        Ok(returns) => returns.result.value.and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default(),
        Err(e) => {
            debug!("reading textContent failed: {e}");
            String::new()
        }
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&self, url: &str) -> PageRecord {
        let session = match self.launch().await {
            Ok(session) => session,
            Err(e) => {
                error!("❌ {e}");
                return PageRecord::unrendered(url);
            }
        };
        let record = self.render_with(&session.browser, url).await;
        session.close().await;
        record
    }
}

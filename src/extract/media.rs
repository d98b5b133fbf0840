use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{first_match, meta_content, Strategy};
use crate::types::{ArtifactSelection, MediaKind, MediaReference};

/// Substring that marks the full-size cover in the Twitter card image URL.
pub const LARGE_IMAGE_MARKER: &str = "image_large_";

const VIDEO: &[Strategy<String>] = &[Strategy { name: "og:video:url", run: og_video }];
const AUDIO: &[Strategy<String>] = &[Strategy { name: "og:audio", run: og_audio }];
const IMAGE: &[Strategy<String>] = &[
    Strategy { name: "twitter:image (large)", run: twitter_large_image },
    Strategy { name: "og:image", run: og_image },
];

fn selector(css: &str) -> Selector { Selector::parse(css).expect("valid selector") }

static OG_VIDEO: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:video:url"]"#));
static OG_AUDIO: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:audio"]"#));
static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
static TWITTER_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="twitter:image"]"#));

fn og_video(doc: &Html) -> Option<String> { meta_content(doc, &OG_VIDEO) }

fn og_audio(doc: &Html) -> Option<String> { meta_content(doc, &OG_AUDIO) }

// A twitter:image without the marker is a thumbnail variant and is skipped on purpose.
fn twitter_large_image(doc: &Html) -> Option<String> {
    meta_content(doc, &TWITTER_IMAGE).filter(|u| u.contains(LARGE_IMAGE_MARKER))
}

fn og_image(doc: &Html) -> Option<String> { meta_content(doc, &OG_IMAGE) }

/// Media lookups over one parsed copy of a page's static HTML.
pub struct MediaLocator {
    doc: Html,
}

impl MediaLocator {
    pub fn new(html: &str) -> Self { Self { doc: Html::parse_document(html) } }

    pub fn locate(&self, kind: MediaKind) -> MediaReference {
        let (what, chain) = match kind {
            MediaKind::Video => ("video", VIDEO),
            MediaKind::Audio => ("audio", AUDIO),
            MediaKind::Image => ("image", IMAGE),
        };
        MediaReference { kind, source_url: first_match(&self.doc, what, chain) }
    }
}

/// Source URL of one media kind, returned exactly as written in the page.
pub fn locate_media(html: &str, kind: MediaKind) -> Option<String> {
    MediaLocator::new(html).locate(kind).source_url
}

/// References for every media kind `selection` asks for, in video, audio, image order.
pub fn locate_all(html: &str, selection: &ArtifactSelection) -> Vec<MediaReference> {
    let locator = MediaLocator::new(html);
    [(selection.mp4, MediaKind::Video), (selection.mp3, MediaKind::Audio), (selection.image, MediaKind::Image)]
        .into_iter()
        .filter(|(wanted, _)| *wanted)
        .map(|(_, kind)| locator.locate(kind))
        .collect()
}

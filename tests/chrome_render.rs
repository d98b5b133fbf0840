//! Rendering against a real Chromium. Run with `cargo test -- --ignored`.

mod common;

use std::collections::HashMap;

use common::Route;
use suno_harvest::config::RenderConfig;
use suno_harvest::prelude::*;
use suno_harvest::types::UNKNOWN_TITLE;

fn renderer() -> ChromeRenderer {
    ChromeRenderer::new(RenderConfig { navigation_timeout_secs: 15, selector_timeout_secs: 1, ..RenderConfig::default() })
}

#[tokio::test]
#[ignore = "needs a local Chrome/Chromium"]
async fn lyrics_timeout_keeps_title_and_html() {
    let page = "<html><head><title>Night Drive</title></head><body><p>no lyrics here</p></body></html>";
    let server = common::start(HashMap::from([("/song/n", Route::html(page))]));

    let record = renderer().render(&server.url("/song/n")).await;

    assert!(record.is_rendered());
    assert_eq!(record.title, "Night Drive");
    assert!(record.lyrics.is_none());
    assert!(record.rendered_html.as_deref().is_some_and(|h| h.contains("no lyrics here")));
}

#[tokio::test]
#[ignore = "needs a local Chrome/Chromium"]
async fn lyrics_are_read_from_the_selector() {
    let page = r#"<html><head><title>Song</title></head><body>
        <section class="w-full"><div>  first line
second line  </div><div>other</div></section>
    </body></html>"#;
    let server = common::start(HashMap::from([("/song/l", Route::html(page))]));

    let record = renderer().render(&server.url("/song/l")).await;

    assert_eq!(record.lyrics.as_deref(), Some("first line\nsecond line"));
}

#[tokio::test]
#[ignore = "needs a local Chrome/Chromium"]
async fn unreachable_page_is_unrendered() {
    let record = renderer().render("http://127.0.0.1:1/").await;

    assert!(!record.is_rendered());
    assert_eq!(record.title, UNKNOWN_TITLE);
    assert!(record.rendered_html.is_none());
    assert!(record.lyrics.is_none());
}

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{first_match, Strategy};

/// Key of the generation prompt inside the page's embedded script payloads.
pub const PROMPT_MARKER: &str = "gpt_description_prompt";

/// Boilerplate the site appends to its meta descriptions.
pub const MARKETING_SUFFIX: &str = " song. Listen and make your own with Suno.";

// The payload is JSON escaped inside a JS string: gpt_description_prompt\":\"value\"
static PROMPT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"gpt_description_prompt\\"\s*:\s*\\"?([^\\"]+)\\"?"#).expect("prompt pattern is a valid regex")
});
static SCRIPTS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").expect("valid selector"));
static METAS_WITH_CONTENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta[content]").expect("valid selector"));

const STRATEGIES: &[Strategy<String>] = &[
    Strategy { name: "script-payload", run: from_script_payload },
    Strategy { name: "third-meta-content", run: from_third_meta },
];

/// Finds the AI generation prompt in rendered page HTML.
///
/// Inline scripts are scanned first; failing that, the `content` of the third
/// `<meta>` that has one is used. That positional fallback depends on the
/// site's current head layout and breaks silently if tags are reordered.
///
/// Cleanup runs on whichever stage produced a value. A script value that
/// cleans to nothing yields `None`; the meta fallback is not consulted.
pub fn extract_prompt(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    first_match(&doc, "prompt", STRATEGIES).and_then(|raw| clean_prompt(&raw))
}

// Marker blocks the pattern does not match are passed over.
fn from_script_payload(doc: &Html) -> Option<String> {
    doc.select(&SCRIPTS)
        .map(|s| s.text().collect::<String>())
        .filter(|text| text.contains(PROMPT_MARKER))
        .find_map(|text| PROMPT_PATTERN.captures(&text).map(|c| c[1].to_string()))
}

fn from_third_meta(doc: &Html) -> Option<String> {
    let content = doc.select(&METAS_WITH_CONTENT).nth(2)?.value().attr("content")?;
    Some(content.to_string())
}

/// Trims, strips every occurrence of the marketing suffix and trims again.
pub fn clean_prompt(raw: &str) -> Option<String> {
    let cleaned = raw.trim().replace(MARKETING_SUFFIX, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Title used whenever the page does not report one (or could not be loaded).
pub const UNKNOWN_TITLE: &str = "Unknown_Song";

/// Everything the renderer captured for one song page.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub lyrics: Option<String>,
    pub prompt_text: Option<String>,
    pub rendered_html: Option<String>,
    /// Navigation succeeded. The HTML may still be missing if reading it failed afterwards.
    pub navigated: bool,
}

impl PageRecord {
    /// Record for a page that could not be navigated to.
    pub fn unrendered(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: UNKNOWN_TITLE.to_string(),
            lyrics: None,
            prompt_text: None,
            rendered_html: None,
            navigated: false,
        }
    }

    /// Record for a page the browser reached; any of the captured parts may be missing.
    pub fn new(url: &str, title: Option<String>, lyrics: Option<String>, rendered_html: Option<String>) -> Self {
        let title = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let lyrics = lyrics.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());
        Self { url: url.to_string(), title, lyrics, prompt_text: None, rendered_html, navigated: true }
    }

    pub fn is_rendered(&self) -> bool { self.navigated }
}

/// Which artifacts to save for every URL in the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactSelection {
    pub html: bool,
    pub mp4: bool,
    pub mp3: bool,
    pub lyrics: bool,
    pub prompt: bool,
    pub image: bool,
}

impl ArtifactSelection {
    pub fn all() -> Self {
        Self { html: true, mp4: true, mp3: true, lyrics: true, prompt: true, image: true }
    }

    pub fn is_empty(&self) -> bool { *self == Self::default() }

    /// Media artifacts need the static HTML; the rest come from the rendered page.
    pub fn wants_media(&self) -> bool { self.mp4 || self.mp3 || self.image }

    pub fn contains(&self, artifact: Artifact) -> bool {
        match artifact {
            Artifact::Html => self.html,
            Artifact::Video => self.mp4,
            Artifact::Audio => self.mp3,
            Artifact::Lyrics => self.lyrics,
            Artifact::Prompt => self.prompt,
            Artifact::Image => self.image,
        }
    }

    pub fn selected(&self) -> Vec<Artifact> {
        Artifact::ALL.into_iter().filter(|a| self.contains(*a)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

impl MediaKind {
    pub fn artifact(self) -> Artifact {
        match self {
            MediaKind::Video => Artifact::Video,
            MediaKind::Audio => Artifact::Audio,
            MediaKind::Image => Artifact::Image,
        }
    }
}

/// A media source located in a page's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    pub kind: MediaKind,
    pub source_url: Option<String>,
}

/// One of the six outputs that can be saved per URL, with its place on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Html,
    Video,
    Audio,
    Lyrics,
    Prompt,
    Image,
}

impl Artifact {
    pub const ALL: [Artifact; 6] = [Artifact::Html, Artifact::Video, Artifact::Audio, Artifact::Lyrics, Artifact::Prompt, Artifact::Image];

    pub fn category(self) -> &'static str {
        match self {
            Artifact::Html => "HTML",
            Artifact::Video => "Videos",
            Artifact::Audio => "Audio",
            Artifact::Lyrics => "Lyrics",
            Artifact::Prompt => "GPT_Prompts",
            Artifact::Image => "Images",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Artifact::Html => "HTML",
            Artifact::Video => "Video URL",
            Artifact::Audio => "Audio URL",
            Artifact::Lyrics => "Lyrics",
            Artifact::Prompt => "GPT prompt",
            Artifact::Image => "Image URL",
        }
    }

    /// Base name without extension; binary downloads get ` (n)` inserted before the extension.
    pub fn base_name(self, title: &str) -> String {
        match self {
            Artifact::Html => format!("{title} - Parsed"),
            Artifact::Lyrics => format!("{title} - Lyrics"),
            Artifact::Prompt => format!("{title} - GPT_Prompt"),
            Artifact::Image => format!("{title} - Art"),
            Artifact::Video | Artifact::Audio => title.to_string(),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Artifact::Html => "html",
            Artifact::Video => "mp4",
            Artifact::Audio => "mp3",
            Artifact::Lyrics | Artifact::Prompt => "txt",
            Artifact::Image => "jpeg",
        }
    }

    pub fn file_name(self, title: &str) -> String { format!("{}.{}", self.base_name(title), self.extension()) }
}

/// Totals reported at the end of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub urls_total: usize,
    pub urls_skipped: usize,
    pub artifacts_saved: usize,
    pub artifacts_missing: usize,
    pub artifacts_failed: usize,
}

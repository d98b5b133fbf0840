use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{HarvestError, Result};
use crate::types::ArtifactSelection;

/// Default URL list, looked up relative to the working directory.
pub const DEFAULT_URLS_FILE: &str = "suno_urls.txt";

const MENU: &str = "Select what to extract and save for each URL:
1. HTML
2. MP4
3. MP3
4. Lyrics
5. Prompt
6. Image
";

/// Reads one URL per line, trimming each and skipping blanks. A missing file
/// is not an error: it yields no work.
pub async fn read_urls(path: &Path) -> Result<Vec<String>> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("❌ File not found: {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(HarvestError::fs(path, e)),
    };
    Ok(data.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
}

/// Maps a comma-separated list of menu numbers to flags. Unknown tokens are ignored.
pub fn parse_selection(input: &str) -> ArtifactSelection {
    let mut sel = ArtifactSelection::default();
    for token in input.split(',').map(str::trim) {
        match token {
            "1" => sel.html = true,
            "2" => sel.mp4 = true,
            "3" => sel.mp3 = true,
            "4" => sel.lyrics = true,
            "5" => sel.prompt = true,
            "6" => sel.image = true,
            _ => {}
        }
    }
    sel
}

/// Prints the menu and reads a single answer line. EOF counts as an empty answer.
pub fn prompt_selection<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<ArtifactSelection> {
    output.write_all(MENU.as_bytes())?;
    write!(output, "Enter numbers separated by commas (e.g., 1,2,4,5,6): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_selection(&line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listed_tokens() {
        let sel = parse_selection(" 1, 3 ,6");
        assert_eq!(sel, ArtifactSelection { html: true, mp3: true, image: true, ..Default::default() });
    }

    #[test]
    fn ignores_unknown_tokens_and_empty_input() {
        assert!(parse_selection("").is_empty());
        assert!(parse_selection("7, x, 12,,").is_empty());
        assert_eq!(parse_selection("5,9"), ArtifactSelection { prompt: true, ..Default::default() });
    }

    #[test]
    fn prompt_reads_one_line() {
        let mut out = Vec::new();
        let sel = prompt_selection("2,4\n1\n".as_bytes(), &mut out).unwrap();
        assert_eq!(sel, ArtifactSelection { mp4: true, lyrics: true, ..Default::default() });
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("6. Image"));
    }

    #[test]
    fn prompt_eof_selects_nothing() {
        let sel = prompt_selection(io::empty(), io::sink()).unwrap();
        assert!(sel.is_empty());
    }

    #[tokio::test]
    async fn reads_urls_skipping_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "https://suno.com/song/a\n\n   \n  https://suno.com/song/b  \n").unwrap();
        let urls = read_urls(&path).await.unwrap();
        assert_eq!(urls, vec!["https://suno.com/song/a", "https://suno.com/song/b"]);
    }

    #[tokio::test]
    async fn missing_url_file_is_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let urls = read_urls(&dir.path().join("absent.txt")).await.unwrap();
        assert!(urls.is_empty());
    }
}

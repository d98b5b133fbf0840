use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Save HTML, lyrics, prompt, video, audio and cover art for a list of song pages
#[derive(Parser, Debug)]
#[command(name = "suno-harvest", version)]
#[command(about = "Save HTML, lyrics, prompt, video, audio and cover art for a list of song pages", long_about = None)]
pub struct Cli {
    /// File with one song URL per line [default: suno_urls.txt]
    #[arg(short, long, value_name = "FILE")]
    pub urls: Option<PathBuf>,

    /// Directory to create the HTML/, Audio/, ... folders in [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Comma-separated menu numbers (1=HTML 2=MP4 3=MP3 4=Lyrics 5=Prompt 6=Image); skips the prompt
    #[arg(short, long, value_name = "LIST")]
    pub select: Option<String>,

    /// Optional TOML file with timeouts, selectors and HTTP settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses `args`. Usage errors, `--help` and `--version` are printed by clap
    /// and yield `None`, so the process still exits with status 0.
    pub fn from_args<I, T>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Some(cli),
            Err(e) => {
                let _ = e.print();
                None
            }
        }
    }
}

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::fixture::FixtureRequest;

#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(author = "tag-gen contributors")]
#[command(version = "0.1.0")]
#[command(about = "Create an MP3 fixture with empty audio and ID3v2 tags")]
pub struct Cli {
    /// Track artist (TPE1)
    #[arg(long)]
    pub artist: String,

    /// Album name (TALB)
    #[arg(long)]
    pub album: String,

    /// Track title (TIT2)
    #[arg(long)]
    pub title: String,

    /// Track number, stored as a single-entry TRCK frame
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub track: u32,

    /// Output file, overwritten if it already exists
    #[arg(long, default_value = "generated.mp3")]
    pub path: PathBuf,

    /// Optional album artist (TPE2)
    #[arg(long = "album-artist")]
    pub album_artist: Option<String>,

    /// ID3v2 tag version to write
    #[arg(long = "id3-version", value_enum, default_value_t = TagVersion::V24)]
    pub id3_version: TagVersion,

    /// Number of silent MPEG frames in the audio payload
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Read the tag back after writing and fail unless it matches
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Log format: prefixed text lines or one JSON event per line
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Only print errors
    #[arg(long, short = 'q', default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug output for each step
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TagVersion {
    #[value(name = "2.3")]
    V23,
    #[value(name = "2.4")]
    V24,
}

impl TagVersion {
    pub fn id3(self) -> id3::Version {
        match self {
            TagVersion::V23 => id3::Version::Id3v23,
            TagVersion::V24 => id3::Version::Id3v24,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Logger settings derived from CLI flags
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: OutputFormat,
}

impl LogConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            quiet: cli.quiet,
            verbose: cli.verbose,
            output_format: cli.output,
        }
    }
}

impl Cli {
    pub fn request(&self) -> FixtureRequest {
        FixtureRequest {
            artist: self.artist.clone(),
            album: self.album.clone(),
            title: self.title.clone(),
            track: self.track,
            path: self.path.clone(),
            album_artist: self.album_artist.clone(),
            version: self.id3_version,
            frames: self.frames,
        }
    }
}

use anyhow::Context;
use id3::{Tag, TagLike, Version};
use serde::Serialize;
use std::path::Path;

/// Tag values recovered from a fixture file.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FixtureTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Every entry of the track number frame, in order
    pub track: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
}

/// Tag an existing MP3 with ID3v2 frames. The file must already exist; any
/// previous ID3v2 tag in it is replaced.
pub fn tag_mp3(
    file_path: &Path,
    artist: &str,
    album: &str,
    title: &str,
    track: u32,
    album_artist: Option<&str>,
    version: Version,
) -> anyhow::Result<()> {
    let mut tag = Tag::new();
    tag.set_title(title);
    tag.set_artist(artist);
    tag.set_album(album);
    tag.set_track(track);

    if let Some(album_artist) = album_artist {
        tag.set_album_artist(album_artist);
    }

    tag.write_to_path(file_path, version)
        .with_context(|| format!("writing ID3 tag to {}", file_path.display()))?;

    Ok(())
}

/// Read the ID3v2 tag of `file_path` back into [`FixtureTags`].
pub fn read_tags(file_path: &Path) -> anyhow::Result<FixtureTags> {
    let tag = Tag::read_from_path(file_path)
        .with_context(|| format!("reading ID3 tag from {}", file_path.display()))?;

    let version = tag.version();
    Ok(FixtureTags {
        title: text_value(tag.title(), version),
        artist: text_value(tag.artist(), version),
        album: text_value(tag.album(), version),
        track: track_entries(&tag),
        album_artist: tag.album_artist().map(|value| text_value(Some(value), version)),
    })
}

/// ID3v2.3 has no multi-value separator, so the id3 crate decodes a literal
/// '/' in people frames as NUL. Undo that for v2.3 tags.
fn text_value(value: Option<&str>, version: Version) -> String {
    let value = value.unwrap_or_default();
    match version {
        Version::Id3v23 => value.replace('\0', "/"),
        _ => value.to_string(),
    }
}

/// Split the TRCK frame into its numeric entries. "3/12" style totals are
/// ignored; multiple values are separated by NUL in ID3v2.4.
fn track_entries(tag: &Tag) -> Vec<u32> {
    let Some(text) = tag.get("TRCK").and_then(|frame| frame.content().text()) else {
        return Vec::new();
    };

    text.split('\0')
        .filter_map(|entry| entry.split('/').next())
        .filter_map(|number| number.trim().parse().ok())
        .collect()
}

/// Returns true when `data` ends in an ID3v1 "TAG" block.
pub fn has_id3v1(data: &[u8]) -> bool {
    data.len() >= 128 && &data[data.len() - 128..data.len() - 125] == b"TAG"
}

/// Total length of a leading ID3v2 tag (header, body and footer), or 0 when
/// `data` does not start with one.
pub fn id3v2_len(data: &[u8]) -> usize {
    if data.len() < 10 || &data[..3] != b"ID3" {
        return 0;
    }
    let body = data[6..10]
        .iter()
        .fold(0usize, |acc, &b| (acc << 7) | usize::from(b & 0x7F));
    let footer = if data[5] & 0x10 != 0 { 10 } else { 0 };
    10 + body + footer
}

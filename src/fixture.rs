use anyhow::Context;
use std::path::PathBuf;

use crate::audio;
use crate::cli::TagVersion;
use crate::logger::Logger;
use crate::metadata::{self, FixtureTags};

/// Everything needed to produce one fixture file.
#[derive(Clone, Debug)]
pub struct FixtureRequest {
    pub artist: String,
    pub album: String,
    pub title: String,
    pub track: u32,
    pub path: PathBuf,
    pub album_artist: Option<String>,
    pub version: TagVersion,
    pub frames: u32,
}

impl FixtureRequest {
    /// The tags a reader should recover from the generated file.
    pub fn expected_tags(&self) -> FixtureTags {
        FixtureTags {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            track: vec![self.track],
            album_artist: self.album_artist.clone(),
        }
    }
}

/// Write a silent MP3 at `request.path`, then tag it.
///
/// Any existing file at the path is replaced. On failure the file may be
/// missing, empty, or untagged.
pub fn generate(request: &FixtureRequest, logger: &Logger) -> anyhow::Result<()> {
    if request.path.exists() {
        logger.debug(&format!("Overwriting {}", request.path.display()));
    }

    audio::write_silent_mp3(&request.path, request.frames)?;
    logger.debug(&format!(
        "Wrote {} silent frame(s) ({} ms) to {}",
        request.frames,
        audio::duration_ms(request.frames),
        request.path.display()
    ));

    metadata::tag_mp3(
        &request.path,
        &request.artist,
        &request.album,
        &request.title,
        request.track,
        request.album_artist.as_deref(),
        request.version.id3(),
    )?;
    logger.debug(&format!("Tagged {} as {:?}", request.path.display(), request.version));

    Ok(())
}

/// Read the tag back and fail unless it matches what was requested and is
/// followed by MPEG audio.
pub fn verify(request: &FixtureRequest) -> anyhow::Result<FixtureTags> {
    let found = metadata::read_tags(&request.path)?;
    let expected = request.expected_tags();

    if found != expected {
        anyhow::bail!(
            "Tag mismatch in {}: expected {:?}, found {:?}",
            request.path.display(),
            expected,
            found
        );
    }

    let data = std::fs::read(&request.path)
        .with_context(|| format!("reading {}", request.path.display()))?;
    if audio::first_frame(&data, metadata::id3v2_len(&data)).is_none() {
        anyhow::bail!("No MPEG audio after the ID3 tag in {}", request.path.display());
    }
    if metadata::has_id3v1(&data) {
        anyhow::bail!("Unexpected ID3v1 tag in {}", request.path.display());
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LogConfig, OutputFormat};
    use std::path::Path;

    fn quiet_logger() -> Logger {
        Logger::new(LogConfig {
            quiet: true,
            verbose: false,
            output_format: OutputFormat::Text,
        })
    }

    fn request(path: &Path) -> FixtureRequest {
        FixtureRequest {
            artist: "A".to_string(),
            album: "B".to_string(),
            title: "C".to_string(),
            track: 3,
            path: path.to_path_buf(),
            album_artist: None,
            version: TagVersion::V24,
            frames: 1,
        }
    }

    #[test]
    fn test_generate_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("generated.mp3"));

        generate(&req, &quiet_logger()).unwrap();

        let tags = verify(&req).unwrap();
        assert_eq!(tags.artist, "A");
        assert_eq!(tags.album, "B");
        assert_eq!(tags.title, "C");
        assert_eq!(tags.track, vec![3]);
    }

    #[test]
    fn test_generated_file_is_id3_then_audio() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("layout.mp3"));
        generate(&req, &quiet_logger()).unwrap();

        let data = std::fs::read(&req.path).unwrap();
        assert_eq!(&data[..3], b"ID3");
        assert_eq!(data[3], 4);

        let audio_start = audio::first_frame(&data, metadata::id3v2_len(&data)).unwrap();
        assert!(audio_start > 10);
        assert!(data.ends_with(&audio::silent_frame()));
    }

    #[test]
    fn test_generate_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("twice.mp3"));

        generate(&req, &quiet_logger()).unwrap();
        let first = std::fs::read(&req.path).unwrap();
        generate(&req, &quiet_logger()).unwrap();
        let second = std::fs::read(&req.path).unwrap();

        assert_eq!(first, second);
        assert_eq!(metadata::read_tags(&req.path).unwrap(), req.expected_tags());
    }

    #[test]
    fn test_generate_overwrites_unrelated_file() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("existing.mp3"));
        std::fs::write(&req.path, b"not audio at all").unwrap();

        generate(&req, &quiet_logger()).unwrap();
        verify(&req).unwrap();
    }

    #[test]
    fn test_generate_with_album_artist() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(&dir.path().join("aa.mp3"));
        req.album_artist = Some("Various Artists".to_string());
        req.version = TagVersion::V23;
        req.frames = 5;

        generate(&req, &quiet_logger()).unwrap();
        let tags = verify(&req).unwrap();
        assert_eq!(tags.album_artist.as_deref(), Some("Various Artists"));
    }

    #[test]
    fn test_generate_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("no").join("such").join("dir.mp3"));

        let err = generate(&req, &quiet_logger()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to create"));
        assert!(!req.path.exists());
    }

    #[test]
    fn test_verify_slash_in_artist_v23() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(&dir.path().join("acdc.mp3"));
        req.artist = "AC/DC".to_string();
        req.album_artist = Some("AC/DC".to_string());
        req.version = TagVersion::V23;

        generate(&req, &quiet_logger()).unwrap();
        let tags = verify(&req).unwrap();
        assert_eq!(tags.artist, "AC/DC");
    }

    #[test]
    fn test_verify_rejects_tag_without_audio() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("tag_only.mp3"));
        std::fs::File::create(&req.path).unwrap();
        metadata::tag_mp3(&req.path, "A", "B", "C", 3, None, req.version.id3()).unwrap();

        let err = verify(&req).unwrap_err();
        assert!(err.to_string().contains("No MPEG audio"));
    }

    #[test]
    fn test_verify_rejects_trailing_id3v1() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("v1.mp3"));
        generate(&req, &quiet_logger()).unwrap();

        let mut data = std::fs::read(&req.path).unwrap();
        let mut v1 = vec![0u8; 128];
        v1[..3].copy_from_slice(b"TAG");
        data.extend_from_slice(&v1);
        std::fs::write(&req.path, data).unwrap();

        let err = verify(&req).unwrap_err();
        assert!(err.to_string().contains("ID3v1"));
    }

    #[test]
    fn test_verify_detects_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir.path().join("mismatch.mp3"));
        generate(&req, &quiet_logger()).unwrap();

        let mut other = req.clone();
        other.track = 4;
        let err = verify(&other).unwrap_err();
        assert!(err.to_string().contains("Tag mismatch"));
    }
}

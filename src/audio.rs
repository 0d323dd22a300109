use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// MPEG-1 Layer III, no CRC
const SYNC: [u8; 2] = [0xFF, 0xFB];
/// 128 kbps (index 9), 44.1 kHz (index 0), no padding
const RATE_BYTE: u8 = 0x90;
/// Mono, original
const MODE_BYTE: u8 = 0xC4;

const BITRATE: u32 = 128_000;
const SAMPLE_RATE: u32 = 44_100;
const SAMPLES_PER_FRAME: u32 = 1152;

/// Length in bytes of one unpadded frame at the fixed bitrate and sample rate.
pub const fn frame_len() -> usize {
    (144 * BITRATE / SAMPLE_RATE) as usize
}

/// Playback length of `frames` frames, in milliseconds.
pub fn duration_ms(frames: u32) -> u64 {
    u64::from(frames) * u64::from(SAMPLES_PER_FRAME) * 1000 / u64::from(SAMPLE_RATE)
}

/// One silent frame. Zeroed side info means every granule has no
/// main data, which decodes as silence.
pub fn silent_frame() -> Vec<u8> {
    let mut frame = vec![0u8; frame_len()];
    frame[..2].copy_from_slice(&SYNC);
    frame[2] = RATE_BYTE;
    frame[3] = MODE_BYTE;
    frame
}

/// Returns true when `bytes` starts with an MPEG audio frame sync.
pub fn is_frame_sync(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0
}

/// Offset of the first MPEG frame at or after `start`, skipping zero
/// padding left behind by a tag writer.
pub fn first_frame(data: &[u8], start: usize) -> Option<usize> {
    let offset = start + data.get(start..)?.iter().position(|&b| b != 0)?;
    is_frame_sync(&data[offset..]).then_some(offset)
}

/// Create (or truncate) `path` and fill it with `frames` silent frames.
pub fn write_silent_mp3(path: &Path, frames: u32) -> anyhow::Result<()> {
    if frames == 0 {
        anyhow::bail!("an MP3 payload needs at least one frame");
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let frame = silent_frame();
    for _ in 0..frames {
        writer.write_all(&frame)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write audio to {}", path.display()))?;

    Ok(())
}

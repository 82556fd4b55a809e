//! Replay file storage (gzip-compressed JSON).

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use super::replay_event::ReplayEvent;

/// Current replay format version.
pub const REPLAY_VERSION: u32 = 1;

/// A recorded session as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayData {
    pub version: u32,
    /// Lane keys of the session, indexed by lane.
    pub lanes: Vec<char>,
    pub events: Vec<ReplayEvent>,
}

impl ReplayData {
    pub fn new(lanes: Vec<char>, events: Vec<ReplayEvent>) -> Self {
        Self {
            version: REPLAY_VERSION,
            lanes,
            events,
        }
    }
}

/// Write replay data to `path`, creating parent directories.
pub fn save_replay(data: &ReplayData, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create replay directory: {}", dir.display()))?;
    }

    let json = serde_json::to_string(data).context("Failed to serialize replay data")?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create replay file: {}", path.display()))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(json.as_bytes())
        .context("Failed to write compressed data")?;
    encoder.finish().context("Failed to finish compression")?;

    tracing::debug!("saved {} replay events to {}", data.events.len(), path.display());
    Ok(())
}

/// Read replay data written by [`save_replay`].
pub fn load_replay(path: &Path) -> Result<ReplayData> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open replay file: {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut json = String::new();
    decoder
        .read_to_string(&mut json)
        .context("Failed to decompress replay data")?;

    let data: ReplayData =
        serde_json::from_str(&json).context("Failed to deserialize replay data")?;
    if data.version > REPLAY_VERSION {
        bail!(
            "Unsupported replay version {} (max {})",
            data.version,
            REPLAY_VERSION
        );
    }
    Ok(data)
}

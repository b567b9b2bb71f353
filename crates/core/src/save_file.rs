//! On-disk save envelope around a serialized run.
//!
//! The run snapshot is stored as an opaque JSON string next to its SHA-256
//! digest. Loading recomputes the digest and refuses the file on mismatch, so a
//! truncated or hand-edited save never reaches `RunManager::deserialize`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::RestoreError;
use crate::run::RunManager;

pub const SAVE_FILE_VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum SaveFileError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported save file version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("save file checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
    #[error("save file holds an unusable run: {0}")]
    Restore(#[from] RestoreError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub format_version: u16,
    pub seed: u32,
    pub snapshot_hash_hex: String,
    pub updated_at_unix_ms: u64,
    pub sha256_hex: String,
    /// Output of `RunManager::serialize`.
    pub snapshot: String,
}

fn compute_sha256(snapshot: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(snapshot.as_bytes());
    format!("{:064x}", hasher.finalize())
}

fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

impl SaveFile {
    pub fn capture(run: &RunManager) -> Result<Self, SaveFileError> {
        let snapshot = run.serialize()?;
        Ok(Self {
            format_version: SAVE_FILE_VERSION,
            seed: run.seed(),
            snapshot_hash_hex: format!("0x{:016x}", run.snapshot_hash()),
            updated_at_unix_ms: unix_ms_now(),
            sha256_hex: compute_sha256(&snapshot),
            snapshot,
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Autobattler").map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("run_save.json");
            path
        })
    }

    pub fn verify(&self) -> Result<(), SaveFileError> {
        if self.format_version != SAVE_FILE_VERSION {
            return Err(SaveFileError::UnsupportedVersion { found: self.format_version });
        }
        let found = compute_sha256(&self.snapshot);
        if found != self.sha256_hex {
            return Err(SaveFileError::ChecksumMismatch {
                expected: self.sha256_hex.clone(),
                found,
            });
        }
        Ok(())
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), SaveFileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        info!(
            target: "autobattler::save",
            path = %path.display(),
            seed = self.seed,
            "save.written"
        );
        Ok(())
    }

    /// Reads and verifies a save file without touching any run.
    pub fn load(path: &Path) -> Result<Self, SaveFileError> {
        let content = fs::read_to_string(path)?;
        let save: Self = serde_json::from_str(&content)?;
        if let Err(err) = save.verify() {
            warn!(
                target: "autobattler::save",
                path = %path.display(),
                error = %err,
                "save.rejected"
            );
            return Err(err);
        }
        Ok(save)
    }

    pub fn restore_into(&self, run: &mut RunManager) -> Result<(), SaveFileError> {
        self.verify()?;
        run.deserialize(&self.snapshot)?;
        Ok(())
    }
}

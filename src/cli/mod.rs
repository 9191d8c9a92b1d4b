//! Command implementations for the bruhbot binary.
//!
//! The CLI stands in for the chat transport: it parses arguments, calls into
//! the store, and renders typed failures as user-visible text. Because every
//! invocation is a fresh process, both rotation seen-sets are persisted to a
//! JSON sidecar between runs; a long-running transport would simply hold them
//! in memory for the life of the process.

pub mod meme;
pub mod quote;
pub mod stats;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::store::memes::MemeId;
use crate::store::rotation::RotationState;
use crate::store::types::QuoteRecord;

/// On-disk snapshot of both rotation seen-sets.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub quotes: RotationState<QuoteRecord>,
    pub memes: RotationState<MemeId>,
}

impl SessionState {
    /// Load the sidecar, treating a missing file as a fresh session. A file
    /// that no longer parses also starts fresh rather than wedging every
    /// command behind a manual cleanup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rotation state: {}", path.display()))?;
        match serde_json::from_str(&contents) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(%err, "rotation state unreadable, starting a fresh session");
                Ok(Self::default())
            }
        }
    }

    /// Persist atomically (tmp + rename), creating the parent directory on
    /// first use.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create state dir: {}", parent.display()))?;
        }
        let tmp = path.with_extension("tmp");
        let contents = serde_json::to_string(self)?;
        std::fs::write(&tmp, contents)
            .with_context(|| format!("failed to write rotation state: {}", tmp.display()))?;
        std::fs::rename(&tmp, path).context("failed to replace rotation state")?;
        Ok(())
    }
}

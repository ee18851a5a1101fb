// src/store.rs
// =============================================================================
// This module persists discovered players between runs.
//
// The store is a single flat JSON file: an array of
// { "nickname": "...", "steamId": "..." } records. It is written exactly
// once at the end of a successful scan and read back by the 'saved'
// subcommand (handy as seed material for a future scan).
//
// The path is injected by the caller, so two scans pointed at different
// files never share state.
//
// Rust concepts:
// - Serde derive: JSON (de)serialization from plain structs
// - std::fs: Simple whole-file reads and writes
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// One persisted player record
//
// camelCase on disk: { "nickname": "...", "steamId": "..." }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayer {
    pub nickname: String,
    pub steam_id: String,
}

// A player list stored at a fixed path
pub struct PlayerStore {
    path: PathBuf,
}

impl PlayerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // Reads the saved player list
    //
    // A missing file is not an error: it reads as an empty list, the same
    // as never having scanned. A file that exists but holds invalid JSON
    // IS an error, because silently discarding saved data would be worse.
    pub fn load(&self) -> Result<Vec<SavedPlayer>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read {}", self.path.display()))?;
        let players = serde_json::from_str(&content)
            .with_context(|| format!("invalid player file {}", self.path.display()))?;
        Ok(players)
    }

    // Replaces the saved player list with `players`
    pub fn save(&self, players: &[SavedPlayer]) -> Result<()> {
        let content = serde_json::to_string_pretty(players)?;
        fs::write(&self.path, content)
            .with_context(|| format!("could not write {}", self.path.display()))?;
        Ok(())
    }
}

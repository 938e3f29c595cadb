// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song records.
//!
//! A song is the record the song repository hands out: a title plus
//! positionally aligned `lyrics` and `chords` lines. This module loads and
//! saves songs as JSON (the repository's wire shape) or YAML (hand-edited
//! song files), and produces transposed copies for display.

pub mod catalog;
pub mod form;
pub mod sheet;

pub use catalog::Catalog;
pub use form::SongDraft;
pub use sheet::{Sheet, SheetRow};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SheetError;
use crate::music::Chord;
use crate::transpose::{segments, transpose_chord, Direction, Segment};

/// Delimiter splitting one chord or lyric entry into stacked display lines
pub const STACK_DELIMITER: char = '.';

/// On-disk format of a song or catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format from a file extension (`.json`, anything else is YAML)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// A song as stored by the repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Song {
    /// Repository identifier (`_id` on the wire)
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// One entry per display line
    #[serde(default)]
    pub lyrics: Vec<String>,
    /// One entry per display line, aligned with `lyrics`
    #[serde(default)]
    pub chords: Vec<String>,
}

impl Song {
    pub fn new(title: impl Into<String>, lyrics: Vec<String>, chords: Vec<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            lyrics,
            chords,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Load a song from a JSON or YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read song file: {:?}", path))?;
        let song = match FileFormat::from_path(path) {
            FileFormat::Json => Self::from_json(&contents),
            FileFormat::Yaml => Self::from_yaml(&contents),
        }
        .with_context(|| format!("Failed to load song file: {:?}", path))?;

        debug!(title = %song.title, lines = song.chords.len(), "Loaded song");
        Ok(song)
    }

    /// Save a song, choosing the format from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = match FileFormat::from_path(path) {
            FileFormat::Json => self.to_json()?,
            FileFormat::Yaml => self.to_yaml()?,
        };
        fs::write(path, contents).with_context(|| format!("Failed to write song file: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse song JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize song to JSON")
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse song YAML")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize song to YAML")
    }

    /// Copy of this song with every chord moved one semitone
    pub fn transposed(&self, direction: Direction) -> Song {
        self.transposed_by(direction.delta())
    }

    /// Copy of this song with every chord moved by `semitones`.
    ///
    /// A token holding the stack delimiter ("G.Am") is moved piece by
    /// piece when every piece is a chord; otherwise ("N.C.") it is left
    /// alone like any other unrecognized token.
    pub fn transposed_by(&self, semitones: i32) -> Song {
        self.transposed_with(semitones, STACK_DELIMITER)
    }

    /// Like [`Song::transposed_by`] with a custom stack delimiter
    pub fn transposed_with(&self, semitones: i32, delimiter: char) -> Song {
        let chords = self
            .chords
            .iter()
            .map(|entry| transpose_stacked_line(entry, semitones, delimiter))
            .collect();

        Song {
            id: self.id.clone(),
            title: self.title.clone(),
            lyrics: self.lyrics.clone(),
            chords,
        }
    }

    /// Check that lyrics and chords can be laid out side by side
    pub fn check_layout(&self) -> Result<(), SheetError> {
        if self.lyrics.is_empty() || self.chords.is_empty() {
            return Err(SheetError::Empty);
        }
        if self.lyrics.len() != self.chords.len() {
            return Err(SheetError::LineCountMismatch {
                lyrics: self.lyrics.len(),
                chords: self.chords.len(),
            });
        }
        Ok(())
    }
}

/// Transpose one chord entry, treating `delimiter` as a chord separator
/// only inside tokens made entirely of chords
pub fn transpose_stacked_line(line: &str, semitones: i32, delimiter: char) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    for segment in segments(line) {
        match segment {
            Segment::Space(space) => out.push_str(space),
            Segment::Token(token) if !token.contains(delimiter) => {
                out.push_str(transpose_chord(token, semitones))
            }
            Segment::Token(token) => {
                let stacked = token
                    .split(delimiter)
                    .filter(|piece| !piece.is_empty())
                    .all(|piece| Chord::parse(piece).is_some());
                if stacked {
                    for (i, piece) in token.split(delimiter).enumerate() {
                        if i > 0 {
                            out.push(delimiter);
                        }
                        out.push_str(transpose_chord(piece, semitones));
                    }
                } else {
                    out.push_str(token);
                }
            }
        }
    }
    out
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Create/update form text for a song.
//!
//! Lyrics are edited one line per text line; chords are edited as a
//! single comma-separated field.

use serde::{Deserialize, Serialize};

use super::Song;
use crate::error::SheetError;

/// Separator between chord lines in the chords field
pub const CHORD_FIELD_SEPARATOR: char = ',';

/// Raw form contents for creating or updating a song
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SongDraft {
    /// Set when editing an existing song
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub lyrics: String,
    pub chords: String,
}

impl SongDraft {
    /// Fill the form from an existing song
    pub fn from_song(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            title: song.title.clone(),
            lyrics: song.lyrics.join("\n"),
            chords: song.chords.join(", "),
        }
    }

    /// Check that every field has content
    pub fn validate(&self) -> Result<(), SheetError> {
        if self.title.trim().is_empty() {
            return Err(SheetError::MissingField("title"));
        }
        if self.lyrics.trim().is_empty() {
            return Err(SheetError::MissingField("lyrics"));
        }
        if self.chords.trim().is_empty() {
            return Err(SheetError::MissingField("chords"));
        }
        Ok(())
    }

    /// Convert the form into a song record.
    ///
    /// Chord entries are trimmed, so horizontal alignment inside an entry
    /// starts at its first chord.
    pub fn into_song(self) -> Result<Song, SheetError> {
        self.validate()?;

        let lyrics = self
            .lyrics
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        let chords = self
            .chords
            .split(CHORD_FIELD_SEPARATOR)
            .map(|entry| entry.trim().to_string())
            .collect();

        Ok(Song {
            id: self.id,
            title: self.title,
            lyrics,
            chords,
        })
    }
}

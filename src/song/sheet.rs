// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Plain-text chord sheet layout.
//!
//! Each chord entry is printed above its lyric entry. Either side may hold
//! several display lines joined by the stack delimiter.

use std::fmt;

use super::{Song, STACK_DELIMITER};
use crate::error::SheetError;

/// One chord entry and the lyric entry beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub chords: Vec<String>,
    pub lyrics: Vec<String>,
}

/// A song laid out for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub title: String,
    pub rows: Vec<SheetRow>,
}

fn split_stack(entry: &str, delimiter: char) -> Vec<String> {
    entry.split(delimiter).map(str::to_string).collect()
}

impl Sheet {
    /// Lay out a song using the default stack delimiter
    pub fn build(song: &Song) -> Result<Self, SheetError> {
        Self::build_with(song, STACK_DELIMITER)
    }

    /// Lay out a song, splitting entries on `delimiter`
    pub fn build_with(song: &Song, delimiter: char) -> Result<Self, SheetError> {
        song.check_layout()?;

        let rows = song
            .chords
            .iter()
            .zip(song.lyrics.iter())
            .map(|(chords, lyrics)| SheetRow {
                chords: split_stack(chords, delimiter),
                lyrics: split_stack(lyrics, delimiter),
            })
            .collect();

        Ok(Self {
            title: song.title.clone(),
            rows,
        })
    }

    /// Render as text; chord whitespace is kept verbatim
    pub fn render(&self, show_title: bool) -> String {
        let body = self
            .rows
            .iter()
            .map(|row| {
                row.chords
                    .iter()
                    .chain(row.lyrics.iter())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        if show_title {
            format!("{}\n\n{}\n", self.title, body)
        } else {
            format!("{}\n", body)
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

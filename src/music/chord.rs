// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord tokens as they appear on a chord sheet.
//!
//! A token is recognized only if it matches one of the canonical table
//! spellings exactly. Anything else ("Bb", "Cmaj7", "N.C.") is left to the
//! caller, which passes it through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::{PitchClass, MAJOR_TABLE, MINOR_SUFFIX, MINOR_TABLE, PITCH_CLASS_COUNT};

/// Chord quality, selecting which name table a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Major,
    Minor,
}

impl Quality {
    /// Classify a token by its trailing minor suffix
    pub fn of(token: &str) -> Self {
        if token.ends_with(MINOR_SUFFIX) {
            Quality::Minor
        } else {
            Quality::Major
        }
    }

    /// Name table for this quality
    pub fn table(self) -> &'static [&'static str; PITCH_CLASS_COUNT] {
        match self {
            Quality::Major => &MAJOR_TABLE,
            Quality::Minor => &MINOR_TABLE,
        }
    }
}

/// A recognized chord: root pitch class plus quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    root: PitchClass,
    quality: Quality,
}

impl Chord {
    /// Create a chord
    pub fn new(root: PitchClass, quality: Quality) -> Self {
        Self { root, quality }
    }

    /// Parse a token against the table its suffix selects.
    ///
    /// "C" only ever matches the major table and "Cm" only the minor one,
    /// so the two never share an index space.
    pub fn parse(token: &str) -> Option<Self> {
        let quality = Quality::of(token);
        quality
            .table()
            .iter()
            .position(|entry| *entry == token)
            .map(|index| Self::new(PitchClass::from_index(index), quality))
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Position in this chord's quality table
    pub fn index(&self) -> usize {
        self.root.index()
    }

    /// Shift the root by semitones, keeping the quality
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.root.transpose(semitones), self.quality)
    }

    /// Canonical spelling
    pub fn as_str(&self) -> &'static str {
        self.quality.table()[self.index()]
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

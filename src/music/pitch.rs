// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and the chord-name tables.
//!
//! Chord sheets spell every root with sharps, starting from A. The two
//! tables below are the only spellings the transposer recognizes; each is
//! a cyclic group of order 12 indexed by [`PitchClass::index`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of pitch classes in the chromatic scale
pub const PITCH_CLASS_COUNT: usize = 12;

/// Suffix marking a minor chord ("Am", "C#m")
pub const MINOR_SUFFIX: char = 'm';

/// Major chord names in table order
pub const MAJOR_TABLE: [&str; PITCH_CLASS_COUNT] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Minor chord names in table order, parallel to [`MAJOR_TABLE`]
pub const MINOR_TABLE: [&str; PITCH_CLASS_COUNT] = [
    "Am", "A#m", "Bm", "Cm", "C#m", "Dm", "D#m", "Em", "Fm", "F#m", "Gm", "G#m",
];

/// Pitch classes (sharp spelling only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    A,
    As, // A#
    B,
    C,
    Cs, // C#
    D,
    Ds, // D#
    E,
    F,
    Fs, // F#
    G,
    Gs, // G#
}

impl PitchClass {
    /// All pitch classes in table order
    pub const ALL: [PitchClass; PITCH_CLASS_COUNT] = [
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
    ];

    /// Position in the chord tables (A = 0, G# = 11)
    pub fn index(self) -> usize {
        match self {
            PitchClass::A => 0,
            PitchClass::As => 1,
            PitchClass::B => 2,
            PitchClass::C => 3,
            PitchClass::Cs => 4,
            PitchClass::D => 5,
            PitchClass::Ds => 6,
            PitchClass::E => 7,
            PitchClass::F => 8,
            PitchClass::Fs => 9,
            PitchClass::G => 10,
            PitchClass::Gs => 11,
        }
    }

    /// Get pitch class from a table index (taken modulo 12)
    pub fn from_index(index: usize) -> Self {
        PitchClass::ALL[index % PITCH_CLASS_COUNT]
    }

    /// Look up a pitch class by its exact major-table spelling
    pub fn from_name(name: &str) -> Option<Self> {
        MAJOR_TABLE
            .iter()
            .position(|entry| *entry == name)
            .map(PitchClass::from_index)
    }

    /// Transpose by semitones, wrapping around the table
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::from_index(wrap_index(self.index(), semitones))
    }

    /// Major spelling ("C#")
    pub fn name(self) -> &'static str {
        MAJOR_TABLE[self.index()]
    }

    /// Minor spelling ("C#m")
    pub fn minor_name(self) -> &'static str {
        MINOR_TABLE[self.index()]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shift a table index by a signed semitone count, normalized into [0, 12)
pub fn wrap_index(index: usize, semitones: i32) -> usize {
    let count = PITCH_CLASS_COUNT as i64;
    (index as i64 + semitones as i64).rem_euclid(count) as usize
}

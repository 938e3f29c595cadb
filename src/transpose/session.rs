// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Running transposition state for a displayed song.
//!
//! The session keeps the untouched chords and a cumulative offset, and
//! derives the displayed chords from both on demand. Stepping up and back
//! down always lands on the original text, even for lines containing
//! tokens the tables don't know.

use tracing::debug;

use super::{transpose_by, Direction};
use crate::music::pitch::wrap_index;

/// Chords plus the offset currently applied to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransposeSession {
    original: Vec<String>,
    offset: usize,
}

impl TransposeSession {
    /// Start a session at offset 0
    pub fn new(chords: Vec<String>) -> Self {
        Self {
            original: chords,
            offset: 0,
        }
    }

    /// Apply one step in the given direction
    pub fn step(&mut self, direction: Direction) {
        self.offset = wrap_index(self.offset, direction.delta());
        debug!(%direction, offset = self.offset, "Transposed chords");
    }

    pub fn up(&mut self) {
        self.step(Direction::Up);
    }

    pub fn down(&mut self) {
        self.step(Direction::Down);
    }

    /// Return to the original key
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Semitones above the original key, in [0, 12)
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the displayed chords differ from the original key
    pub fn is_transposed(&self) -> bool {
        self.offset != 0
    }

    /// Chords as supplied
    pub fn original(&self) -> &[String] {
        &self.original
    }

    /// Chords at the current offset
    pub fn current(&self) -> Vec<String> {
        transpose_by(&self.original, self.offset as i32)
    }
}

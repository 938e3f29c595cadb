// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for song records and sheet layout.
//!
//! Transposition itself never fails; these cover the checks the host
//! performs around it.

use thiserror::Error;

/// Problems with a song's shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// A required draft field was left blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Lyrics and chords must pair up line for line
    #[error("Lyrics and chords are not aligned: {lyrics} lyric lines, {chords} chord lines")]
    LineCountMismatch { lyrics: usize, chords: usize },

    /// Nothing to lay out
    #[error("Song has no lyrics or chords")]
    Empty,
}

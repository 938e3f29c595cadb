// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord sheet transposition.
//!
//! The core is [`transpose::transpose`], which moves every recognized chord
//! on a sheet one semitone up or down while keeping the sheet's spacing
//! intact. Around it sit song records, form conversion, plain-text sheet
//! layout and a song catalog.

pub mod config;
pub mod error;
pub mod music;
pub mod song;
pub mod transpose;

pub use error::SheetError;
pub use music::{Chord, PitchClass, Quality};
pub use song::{Catalog, Sheet, Song, SongDraft};
pub use transpose::{transpose, transpose_by, Direction, TransposeSession};

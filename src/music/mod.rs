// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for chord sheets.
//!
//! This module provides the pitch-class tables and chord token
//! classification used by the transposer.

pub mod chord;
pub mod pitch;

pub use chord::{Chord, Quality};
pub use pitch::{PitchClass, MAJOR_TABLE, MINOR_TABLE};

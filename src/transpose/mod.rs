// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord line transposition.
//!
//! Chord sheets are whitespace-sensitive: each chord sits above the
//! syllable where it changes, so a line is split into alternating token
//! and whitespace segments and rebuilt with every whitespace run kept
//! byte for byte. Recognized chord tokens are shifted around the
//! 12-entry tables; everything else passes through unchanged.
//!
//! All functions here are pure. Holding a running offset across repeated
//! presses is the caller's job (see [`session::TransposeSession`]).

pub mod session;

pub use session::TransposeSession;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::music::pitch::PITCH_CLASS_COUNT;
use crate::music::Chord;

/// Direction of a single transposition step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed semitone delta for one step
    pub fn delta(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "+" => Ok(Direction::Up),
            "down" | "-" => Ok(Direction::Down),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

/// One piece of a chord line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A maximal run of non-whitespace characters
    Token(&'a str),
    /// A maximal run of whitespace characters
    Space(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Token(s) | Segment::Space(s) => *s,
        }
    }
}

/// Iterator over the segments of a line.
///
/// Concatenating every yielded segment reproduces the line exactly.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let in_space = first.is_whitespace();

        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != in_space)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());

        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;

        Some(if in_space {
            Segment::Space(head)
        } else {
            Segment::Token(head)
        })
    }
}

/// Split a line into alternating token and whitespace segments
pub fn segments(line: &str) -> Segments<'_> {
    Segments { rest: line }
}

/// Transpose a single token, returning it unchanged if unrecognized
pub fn transpose_chord(token: &str, semitones: i32) -> &str {
    match Chord::parse(token) {
        Some(chord) => chord.transpose(semitones).as_str(),
        None => token,
    }
}

/// Shift every recognized chord in a line by a signed semitone count
pub fn transpose_line_by(line: &str, semitones: i32) -> String {
    if semitones.rem_euclid(PITCH_CLASS_COUNT as i32) == 0 {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 8);
    for segment in segments(line) {
        match segment {
            Segment::Token(token) => out.push_str(transpose_chord(token, semitones)),
            Segment::Space(space) => out.push_str(space),
        }
    }
    out
}

/// Shift every recognized chord in a line one semitone
pub fn transpose_line(line: &str, direction: Direction) -> String {
    transpose_line_by(line, direction.delta())
}

/// Transpose a chord sheet one semitone in the given direction.
///
/// The output always has the same number of lines as the input.
pub fn transpose<S: AsRef<str>>(lines: &[S], direction: Direction) -> Vec<String> {
    transpose_by(lines, direction.delta())
}

/// Transpose a chord sheet by an arbitrary signed semitone count
pub fn transpose_by<S: AsRef<str>>(lines: &[S], semitones: i32) -> Vec<String> {
    lines
        .iter()
        .map(|line| transpose_line_by(line.as_ref(), semitones))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{MAJOR_TABLE, MINOR_TABLE};

    fn up(lines: &[&str]) -> Vec<String> {
        transpose(lines, Direction::Up)
    }

    fn down(lines: &[&str]) -> Vec<String> {
        transpose(lines, Direction::Down)
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), 1);
        assert_eq!(Direction::Down.delta(), -1);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(" - ".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Down.to_string().parse::<Direction>(), Ok(Direction::Down));
    }

    #[test]
    fn test_segments_rejoin_exactly() {
        let lines = ["", "   ", "C", "  C   G  ", "Am\tF\n", "x y  z"];
        for line in lines {
            let rejoined: String = segments(line).map(|s| s.as_str()).collect();
            assert_eq!(rejoined, line);
        }
    }

    #[test]
    fn test_segments_alternate() {
        let parts: Vec<_> = segments(" C  Am").collect();
        assert_eq!(
            parts,
            vec![
                Segment::Space(" "),
                Segment::Token("C"),
                Segment::Space("  "),
                Segment::Token("Am"),
            ]
        );
    }

    #[test]
    fn test_segments_empty_line() {
        assert_eq!(segments("").count(), 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(up(&[]).is_empty());
        assert!(down(&[]).is_empty());
    }

    #[test]
    fn test_single_step() {
        assert_eq!(up(&["C"]), vec!["C#"]);
        assert_eq!(up(&["Cm"]), vec!["C#m"]);
        assert_eq!(down(&["D"]), vec!["C#"]);
        assert_eq!(down(&["Dm"]), vec!["C#m"]);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(up(&["G#"]), vec!["A"]);
        assert_eq!(down(&["A"]), vec!["G#"]);
        assert_eq!(up(&["G#m"]), vec!["Am"]);
        assert_eq!(down(&["Am"]), vec!["G#m"]);
    }

    #[test]
    fn test_whitespace_fidelity() {
        assert_eq!(up(&["C   D"]), vec!["C#   D#"]);
        assert_eq!(up(&["  Am    F  "]), vec!["  A#m    F#  "]);
        assert_eq!(up(&["C\t\tG"]), vec!["C#\t\tG#"]);
        assert_eq!(up(&["    "]), vec!["    "]);
        assert_eq!(up(&[""]), vec![""]);
    }

    #[test]
    fn test_unicode_whitespace() {
        // Non-breaking spaces separate chords and are kept as-is
        assert_eq!(up(&["C\u{a0}\u{a0}G"]), vec!["C#\u{a0}\u{a0}G#"]);
        assert_eq!(up(&["C\u{2003}Am"]), vec!["C#\u{2003}A#m"]);
        // NEL is Unicode whitespace
        assert_eq!(up(&["C\u{85}G"]), vec!["C#\u{85}G#"]);
        // BOM is not whitespace, so it glues onto the chord
        assert_eq!(up(&["\u{feff}C G"]), vec!["\u{feff}C G#"]);
    }

    #[test]
    fn test_unrecognized_tokens_pass_through() {
        assert_eq!(up(&["Bb x"]), vec!["Bb x"]);
        assert_eq!(down(&["Bb x"]), vec!["Bb x"]);
        assert_eq!(up(&["Cmaj7  G"]), vec!["Cmaj7  G#"]);
        assert_eq!(up(&["N.C."]), vec!["N.C."]);
    }

    #[test]
    fn test_round_trip_every_chord() {
        for name in MAJOR_TABLE.iter().chain(MINOR_TABLE.iter()) {
            let there = up(&[*name]);
            let back = transpose(&there, Direction::Down);
            assert_eq!(back, vec![name.to_string()]);
        }
    }

    #[test]
    fn test_twelve_steps_is_identity() {
        let original = vec!["C  G   Am F".to_string(), " D#m   A# ".to_string()];
        for direction in [Direction::Up, Direction::Down] {
            let mut lines = original.clone();
            for _ in 0..12 {
                lines = transpose(&lines, direction);
            }
            assert_eq!(lines, original);
        }
    }

    #[test]
    fn test_transpose_by_matches_repeated_steps() {
        let original = ["C  G   Am F"];
        let mut stepped: Vec<String> = original.iter().map(|s| s.to_string()).collect();
        for n in 1..=14 {
            stepped = transpose(&stepped, Direction::Up);
            assert_eq!(transpose_by(&original, n), stepped);
        }
        assert_eq!(transpose_by(&original, -1), down(&original));
        assert_eq!(transpose_by(&original, 0), vec!["C  G   Am F"]);
    }

    #[test]
    fn test_line_count_preserved() {
        let lines = ["C", "", "  ", "Bb", "Am G"];
        assert_eq!(up(&lines).len(), lines.len());
    }

    #[test]
    fn test_transpose_chord_borrows_unknown() {
        let token = String::from("Bb");
        assert!(std::ptr::eq(transpose_chord(&token, 3), token.as_str()));
        assert_eq!(transpose_chord("E", 1), "F");
    }
}

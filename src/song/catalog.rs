// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A list of songs with title search.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::{FileFormat, Song};

/// Songs in repository order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Load a catalog file holding a list of songs (JSON or YAML)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let songs: Vec<Song> = match FileFormat::from_path(path) {
            FileFormat::Json => serde_json::from_str(&contents).context("Failed to parse catalog JSON")?,
            FileFormat::Yaml => serde_yaml::from_str(&contents).context("Failed to parse catalog YAML")?,
        };

        debug!(songs = songs.len(), path = ?path, "Loaded catalog");
        Ok(Self::from_songs(songs))
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Find a song by repository id
    pub fn get(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id.as_deref() == Some(id))
    }

    /// Songs whose title contains `query`, ignoring case.
    ///
    /// An empty query matches every song.
    pub fn search(&self, query: &str) -> Vec<&Song> {
        let needle = query.to_lowercase();
        self.songs
            .iter()
            .filter(|song| song.title.to_lowercase().contains(&needle))
            .collect()
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chordsheet::config::{Settings, SongEvent, SongWatcher};
use chordsheet::{Catalog, Direction, Sheet, Song};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chordsheet")]
#[command(about = "Transpose and display chord sheets", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpose a song file and print or save the result
    Transpose {
        /// Song file (YAML or JSON)
        file: PathBuf,

        /// Number of semitone steps
        #[arg(short, long, default_value = "1")]
        steps: u32,

        /// Direction of each step: "up" or "down"
        #[arg(short, long, default_value = "up")]
        direction: Direction,

        /// Write the transposed song here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a song as a plain-text chord sheet
    Show {
        file: PathBuf,

        /// Signed semitone offset (defaults to the settings value)
        #[arg(short, long, allow_hyphen_values = true)]
        steps: Option<i32>,
    },

    /// Search a catalog file by title
    Search {
        catalog: PathBuf,

        /// Case-insensitive title fragment; empty lists everything
        #[arg(default_value = "")]
        query: String,
    },

    /// Re-render a song whenever its file changes
    Watch {
        file: PathBuf,

        #[arg(short, long, allow_hyphen_values = true)]
        steps: Option<i32>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(song: &Song, steps: i32, settings: &Settings) -> Result<String> {
    let song = song.transposed_with(steps, settings.stack_delimiter);
    let sheet = Sheet::build_with(&song, settings.stack_delimiter)
        .with_context(|| format!("Cannot lay out \"{}\"", song.title))?;
    Ok(sheet.render(settings.show_title))
}

fn transpose_file(
    file: &Path,
    steps: u32,
    direction: Direction,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let song = Song::load(file)?;
    let semitones = i32::try_from(steps).context("Step count out of range")? * direction.delta();
    let transposed = song.transposed_with(semitones, settings.stack_delimiter);
    info!(title = %song.title, semitones, "Transposed song");

    match output {
        Some(path) => {
            transposed.save(path)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", transposed.to_yaml()?),
    }
    Ok(())
}

fn show_file(file: &Path, steps: i32, settings: &Settings) -> Result<()> {
    let song = Song::load(file)?;
    print!("{}", render(&song, steps, settings)?);
    Ok(())
}

fn search_catalog(path: &Path, query: &str) -> Result<()> {
    let catalog = Catalog::load(path)?;
    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("No songs match \"{}\"", query);
        return Ok(());
    }
    for song in matches {
        match &song.id {
            Some(id) => println!("{}  {}", id, song.title),
            None => println!("{}", song.title),
        }
    }
    Ok(())
}

fn watch_file(file: &Path, steps: i32, settings: &Settings) -> Result<()> {
    show_file(file, steps, settings)?;

    let watcher = SongWatcher::new(file, Some(settings.debounce_ms))?;
    info!(path = ?watcher.watched_path(), "Watching for changes (Ctrl+C to stop)");

    while let Some(event) = watcher.recv() {
        match event {
            SongEvent::Reloaded(song) => match render(&song, steps, settings) {
                Ok(text) => {
                    println!();
                    print!("{}", text);
                }
                Err(e) => warn!("{:#}", e),
            },
            SongEvent::Error(message) => warn!("{}", message),
            SongEvent::FileDeleted(path) => info!(path = ?path, "Song file removed, waiting for it to return"),
            SongEvent::FileCreated(_) => {}
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Transpose {
            file,
            steps,
            direction,
            output,
        } => transpose_file(&file, steps, direction, output.as_deref(), &settings),
        Commands::Show { file, steps } => {
            show_file(&file, steps.unwrap_or(settings.default_steps), &settings)
        }
        Commands::Search { catalog, query } => search_catalog(&catalog, &query),
        Commands::Watch { file, steps } => {
            watch_file(&file, steps.unwrap_or(settings.default_steps), &settings)
        }
    }
}

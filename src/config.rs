/*
 *  config.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Defaults, YAML file and command line, layered in that order
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use dirs_next::home_dir;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::display::options::{RenderOptions, RenderSettings};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>, // e.g., "info" | "debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceConfig>,
    /// lyric look, same keys as the host's settings payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyric: Option<RenderSettings>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SurfaceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "lyricdeck", version, about = "Karaoke lyric frames for a key strip")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(long, short = 'v', global = true, action = ArgAction::SetTrue)]
    pub debug: bool,

    #[arg(long, global = true)]
    pub width: Option<u32>,
    #[arg(long, global = true)]
    pub height: Option<u32>,

    #[arg(long, global = true)]
    pub background_color: Option<String>,
    #[arg(long, global = true)]
    pub primary_color: Option<String>,
    #[arg(long, global = true)]
    pub secondary_color: Option<String>,
    #[arg(long, global = true)]
    pub highlight_color: Option<String>,
    /// left | center | right
    #[arg(long, global = true)]
    pub primary_align: Option<String>,
    #[arg(long, global = true)]
    pub secondary_align: Option<String>,
    #[arg(long, global = true, action = ArgAction::Set)]
    pub show_translation: Option<bool>,
    #[arg(long, global = true, action = ArgAction::Set)]
    pub highlight_word: Option<bool>,

    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render one lyric position to a PNG
    Render {
        /// JSON file holding a lyric position
        #[arg(long, value_hint = ValueHint::FilePath)]
        position: Option<PathBuf>,
        /// JSON file holding the song info
        #[arg(long, value_hint = ValueHint::FilePath)]
        song: Option<PathBuf>,
        #[arg(long, short = 'o', default_value = "lyric.png", value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// milliseconds since the word was first shown
        #[arg(long, default_value_t = 0)]
        at_ms: u64,
    },
    /// Follow state-sync messages on stdin, one JSON object per line
    Stream {
        #[arg(long, default_value = ".", value_hint = ValueHint::DirPath)]
        out_dir: PathBuf,
    },
}

impl Config {
    /// Effective surface size, defaults filled in.
    pub fn surface_size(&self) -> (u32, u32) {
        let s = self.surface.unwrap_or_default();
        (s.width.unwrap_or(DEFAULT_WIDTH), s.height.unwrap_or(DEFAULT_HEIGHT))
    }

    pub fn render_options(&self) -> RenderOptions {
        self.lyric
            .as_ref()
            .map(RenderOptions::from_settings)
            .unwrap_or_default()
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// Public entry point: read YAML, merge, apply `cli`, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        merge(&mut cfg, read_yaml(p)?);
    } else if let Some(p) = find_config_file() {
        info!("config from {}", p.display());
        merge(&mut cfg, read_yaml(&p)?);
    } else {
        debug!("no config file found, defaults only");
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of the effective config.
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/lyricdeck/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/lyricdeck/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/lyricdeck.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["lyricdeck.yaml", "config.yaml", "config/lyricdeck.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    // an empty file is a valid, empty config
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.surface, src.surface) {
        (None, Some(s)) => dst.surface = Some(s),
        (Some(d), Some(s)) => merge_surface(d, s),
        _ => {}
    }
    dst.lyric = match (dst.lyric.take(), src.lyric) {
        (Some(d), Some(s)) => Some(d.overlay(s)),
        (d, s) => s.or(d),
    };
}

fn merge_surface(dst: &mut SurfaceConfig, src: SurfaceConfig) {
    if src.width.is_some()  { dst.width = src.width; }
    if src.height.is_some() { dst.height = src.height; }
}

fn cli_settings(cli: &Cli) -> RenderSettings {
    RenderSettings {
        show_translation: cli.show_translation,
        highlight_word: cli.highlight_word,
        background_color: cli.background_color.clone(),
        primary_color: cli.primary_color.clone(),
        secondary_color: cli.secondary_color.clone(),
        highlight_color: cli.highlight_color.clone(),
        primary_align: cli.primary_align.clone(),
        secondary_align: cli.secondary_align.clone(),
        ..Default::default()
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.debug { cfg.log_level = Some("debug".into()); }

    if cli.width.is_some() || cli.height.is_some() {
        merge_surface(
            cfg.surface.get_or_insert_with(SurfaceConfig::default),
            SurfaceConfig { width: cli.width, height: cli.height },
        );
    }

    let overrides = cli_settings(cli);
    if overrides != RenderSettings::default() {
        let base = cfg.lyric.take().unwrap_or_default();
        cfg.lyric = Some(base.overlay(overrides));
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(surface) = cfg.surface.as_ref() {
        if surface.width == Some(0) || surface.height == Some(0) {
            return Err(ConfigError::Validation("surface width/height must be > 0".into()));
        }
    }
    Ok(())
}

/*
 *  main.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
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

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use lyricdeck::animator::{LyricAnimator, PngFileSink};
use lyricdeck::config::{self, Cli, Command, Config};
use lyricdeck::display::components::LyricCompositor;
use lyricdeck::highlight::HighlightClock;
use lyricdeck::lyrics::{LyricPosition, SongInfo};
use lyricdeck::player::{PlayerMessage, Redraw};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn compositor(cfg: &Config) -> LyricCompositor {
    let (width, height) = cfg.surface_size();
    LyricCompositor::new(cfg.render_options(), width, height)
}

fn render_once(cfg: &Config, position: Option<&Path>, song: Option<&Path>, out: &Path, at_ms: u64) -> Result<()> {
    let position: Option<LyricPosition> = position.map(read_json).transpose()?;
    let song: Option<SongInfo> = song.map(read_json).transpose()?;
    let comp = compositor(cfg);

    // the first render anchors the word, the second lands `at_ms` later
    let mut clock = HighlightClock::new();
    let t0 = Instant::now();
    comp.render(position.as_ref(), song.as_ref(), &mut clock, t0);
    let frame = comp.render(position.as_ref(), song.as_ref(), &mut clock, t0 + Duration::from_millis(at_ms));

    frame.save_png(out).with_context(|| format!("writing {}", out.display()))?;
    info!("{}x{} frame written to {}", frame.width(), frame.height(), out.display());
    Ok(())
}

async fn stream(cfg: &Config, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let target = out_dir.join("lyric.png");
    info!("streaming frames to {}", target.display());

    let mut animator = LyricAnimator::new(compositor(cfg), PngFileSink::new(target));
    animator.redraw().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                break;
            }
        };
        let Some(line) = line else {
            debug!("stdin closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match PlayerMessage::parse(&line) {
            Ok(Some(msg)) => {
                if animator.handle(msg).await == Redraw::None {
                    debug!("message left the surface untouched");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("skipping malformed message: {}", e),
        }
    }

    animator.stop();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = match config::load(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if cli.dump_config {
        println!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_filter()))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let result = match cli.command.clone() {
        Some(Command::Render { position, song, out, at_ms }) => {
            render_once(&cfg, position.as_deref(), song.as_deref(), &out, at_ms)
        }
        Some(Command::Stream { out_dir }) => stream(&cfg, &out_dir).await,
        None => stream(&cfg, Path::new(".")).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

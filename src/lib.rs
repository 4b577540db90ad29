/*
 *  lib.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Karaoke lyric frames for a strip of LCD keys
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

pub mod animator;
pub mod config;
pub mod constants;
pub mod deutils;
pub mod display;
pub mod highlight;
pub mod lyrics;
pub mod player;
pub mod segment;

pub use animator::{FrameSink, LyricAnimator, PngFileSink};
pub use display::components::{render, LyricCompositor, RenderState};
pub use display::framebuffer::Frame;
pub use display::options::{RenderOptions, RenderSettings};
pub use highlight::{HighlightClock, HighlightProgress};
pub use lyrics::{LyricLine, LyricPosition, SongInfo};
pub use player::{PlayerMessage, PlayerState, Redraw};

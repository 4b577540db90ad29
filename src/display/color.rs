/*
 *  display/color.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Hex color parsing and linear blending for the karaoke fill
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

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use log::warn;

/// Parse a strict `#RRGGBB` string.
pub fn parse_hex(hex: &str) -> Option<Rgb888> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb888::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse, falling back to white for anything malformed.
pub fn color_or_white(hex: &str) -> Rgb888 {
    parse_hex(hex).unwrap_or_else(|| {
        warn!("malformed color {:?}, using white", hex);
        Rgb888::WHITE
    })
}

/// Uppercase `#RRGGBB`.
pub fn to_hex(c: Rgb888) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r(), c.g(), c.b())
}

/// Per channel linear blend, `t` clamped to 0..=1 (NaN counts as 0).
pub fn lerp(from: Rgb888, to: Rgb888, t: f32) -> Rgb888 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mix = |a: u8, b: u8| -> u8 {
        let v = a as f32 + (b as f32 - a as f32) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb888::new(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
}

/// Blend two hex strings, malformed inputs read as white.
pub fn interpolate(from: &str, to: &str, t: f32) -> String {
    to_hex(lerp(color_or_white(from), color_or_white(to), t))
}

/// Resolved colors of one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb888,
    pub primary: Rgb888,
    pub secondary: Rgb888,
    pub highlight: Rgb888,
}

impl Palette {
    /// Color of a character `t` of the way into the fill.
    pub fn fill(&self, t: f32) -> Rgb888 {
        lerp(self.primary, self.highlight, t)
    }
}

/*
 *  display/layout.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text measurement, truncation and horizontal alignment
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

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ELLIPSIS;
use super::fonts::Typeface;

/// Horizontal placement of a line inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(format!("unknown alignment {:?}", other)),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        })
    }
}

/// Advance width of `text` in `face`, in pixels.
///
/// Mono and pixel glyphs take one cell, wide glyphs their own advance.
pub fn measure(text: &str, face: &Typeface) -> u32 {
    text.chars().map(|ch| face.advance(ch)).sum()
}

/// Fit `text` into `max_width`, cutting trailing chars and appending an ellipsis.
///
/// Text that already fits is borrowed unchanged. When not even the ellipsis
/// fits the result is empty.
pub fn truncate<'a>(text: &'a str, max_width: u32, face: &Typeface) -> Cow<'a, str> {
    let ellipsis_width = face.advance(ELLIPSIS);
    let mut width = 0u32;
    // byte end of the longest prefix that still leaves room for the ellipsis
    let mut cut = None;
    for (i, ch) in text.char_indices() {
        if width + ellipsis_width <= max_width {
            cut = Some(i);
        }
        width += face.advance(ch);
        if width > max_width {
            break;
        }
    }
    if width <= max_width {
        return Cow::Borrowed(text);
    }
    match cut {
        Some(end) => Cow::Owned(format!("{}{}", &text[..end], ELLIPSIS)),
        None => Cow::Borrowed(""),
    }
}

/// Left x of content `content_width` wide, aligned inside `[origin_x, origin_x + box_width)`.
pub fn align_x(alignment: Alignment, origin_x: i32, box_width: u32, content_width: u32) -> i32 {
    let slack = box_width as i32 - content_width as i32;
    match alignment {
        Alignment::Left => origin_x,
        Alignment::Center => origin_x + slack / 2,
        Alignment::Right => origin_x + slack,
    }
}

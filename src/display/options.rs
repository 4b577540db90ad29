/*
 *  display/options.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Raw lyric key settings and their resolved render options
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

use embedded_graphics::pixelcolor::Rgb888;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::deutils::{deserialize_lenient_bool, deserialize_lenient_i32, deserialize_lenient_string};
use super::color::{parse_hex, Palette};
use super::fonts::FontSpec;
use super::layout::Alignment;

/// Settings as the host or the config file hands them over.
///
/// Every field is optional and loosely typed; `RenderOptions::from_settings`
/// turns them into something the compositor can trust.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    #[serde(deserialize_with = "deserialize_lenient_bool", skip_serializing_if = "Option::is_none")]
    pub show_translation: Option<bool>,
    #[serde(deserialize_with = "deserialize_lenient_bool", skip_serializing_if = "Option::is_none")]
    pub highlight_word: Option<bool>,

    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,

    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub primary_align: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string", skip_serializing_if = "Option::is_none")]
    pub secondary_align: Option<String>,

    #[serde(deserialize_with = "deserialize_lenient_i32", skip_serializing_if = "Option::is_none")]
    pub primary_font_size: Option<i32>,
    #[serde(deserialize_with = "deserialize_lenient_i32", skip_serializing_if = "Option::is_none")]
    pub secondary_font_size: Option<i32>,

    #[serde(deserialize_with = "deserialize_lenient_i32", skip_serializing_if = "Option::is_none")]
    pub primary_padding_top: Option<i32>,
    #[serde(deserialize_with = "deserialize_lenient_i32", skip_serializing_if = "Option::is_none")]
    pub secondary_padding_top: Option<i32>,
    #[serde(deserialize_with = "deserialize_lenient_i32", skip_serializing_if = "Option::is_none")]
    pub padding_horizontal: Option<i32>,
}

impl RenderSettings {
    /// Fields set in `top` win over those in `self`.
    pub fn overlay(self, top: RenderSettings) -> RenderSettings {
        RenderSettings {
            show_translation: top.show_translation.or(self.show_translation),
            highlight_word: top.highlight_word.or(self.highlight_word),
            background_color: top.background_color.or(self.background_color),
            primary_color: top.primary_color.or(self.primary_color),
            secondary_color: top.secondary_color.or(self.secondary_color),
            highlight_color: top.highlight_color.or(self.highlight_color),
            primary_align: top.primary_align.or(self.primary_align),
            secondary_align: top.secondary_align.or(self.secondary_align),
            primary_font_size: top.primary_font_size.or(self.primary_font_size),
            secondary_font_size: top.secondary_font_size.or(self.secondary_font_size),
            primary_padding_top: top.primary_padding_top.or(self.primary_padding_top),
            secondary_padding_top: top.secondary_padding_top.or(self.secondary_padding_top),
            padding_horizontal: top.padding_horizontal.or(self.padding_horizontal),
        }
    }
}

/// Resolved, immutable options of one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub show_translation: bool,
    pub highlight_word: bool,
    pub palette: Palette,
    pub primary_align: Alignment,
    pub secondary_align: Alignment,
    pub primary_font_size: u32,
    pub secondary_font_size: u32,
    pub primary_padding_top: i32,
    pub secondary_padding_top: i32,
    pub padding_horizontal: i32,
}

fn default_color(hex: &str) -> Rgb888 {
    parse_hex(hex).unwrap_or(Rgb888::new(0xFF, 0xFF, 0xFF))
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_translation: true,
            highlight_word: true,
            palette: Palette {
                background: default_color(DEFAULT_BACKGROUND),
                primary: default_color(DEFAULT_PRIMARY),
                secondary: default_color(DEFAULT_SECONDARY),
                highlight: default_color(DEFAULT_HIGHLIGHT),
            },
            primary_align: Alignment::Left,
            secondary_align: Alignment::Left,
            primary_font_size: DEFAULT_PRIMARY_FONT_SIZE,
            secondary_font_size: DEFAULT_SECONDARY_FONT_SIZE,
            primary_padding_top: DEFAULT_PRIMARY_PADDING_TOP,
            secondary_padding_top: DEFAULT_SECONDARY_PADDING_TOP,
            padding_horizontal: DEFAULT_PADDING_HORIZONTAL,
        }
    }
}

fn resolve_color(name: &str, raw: Option<&str>, fallback: Rgb888) -> Rgb888 {
    match raw {
        None => fallback,
        Some(s) => parse_hex(s.trim()).unwrap_or_else(|| {
            warn!("{}: invalid color {:?}, using default", name, s);
            fallback
        }),
    }
}

fn resolve_align(name: &str, raw: Option<&str>) -> Alignment {
    match raw.map(str::parse::<Alignment>) {
        None => Alignment::default(),
        Some(Ok(a)) => a,
        Some(Err(e)) => {
            warn!("{}: {}, using left", name, e);
            Alignment::default()
        }
    }
}

fn resolve_font_size(name: &str, raw: Option<i32>, fallback: u32) -> u32 {
    match raw {
        None => fallback,
        Some(px) if px > 0 && px as u32 <= MAX_FONT_SIZE => px as u32,
        Some(px) => {
            warn!("{}: font size {} out of range, using {}", name, px, fallback);
            fallback
        }
    }
}

fn resolve_padding(name: &str, raw: Option<i32>, fallback: i32, allow_zero: bool) -> i32 {
    match raw {
        None => fallback,
        Some(px) if px > 0 || (allow_zero && px == 0) => px,
        Some(px) => {
            warn!("{}: padding {} not usable, using {}", name, px, fallback);
            fallback
        }
    }
}

impl RenderOptions {
    pub fn from_settings(s: &RenderSettings) -> Self {
        let d = RenderOptions::default();
        Self {
            show_translation: s.show_translation.unwrap_or(d.show_translation),
            highlight_word: s.highlight_word.unwrap_or(d.highlight_word),
            palette: Palette {
                background: resolve_color("backgroundColor", s.background_color.as_deref(), d.palette.background),
                primary: resolve_color("primaryColor", s.primary_color.as_deref(), d.palette.primary),
                secondary: resolve_color("secondaryColor", s.secondary_color.as_deref(), d.palette.secondary),
                highlight: resolve_color("highlightColor", s.highlight_color.as_deref(), d.palette.highlight),
            },
            primary_align: resolve_align("primaryAlign", s.primary_align.as_deref()),
            secondary_align: resolve_align("secondaryAlign", s.secondary_align.as_deref()),
            primary_font_size: resolve_font_size("primaryFontSize", s.primary_font_size, d.primary_font_size),
            secondary_font_size: resolve_font_size("secondaryFontSize", s.secondary_font_size, d.secondary_font_size),
            primary_padding_top: resolve_padding("primaryPaddingTop", s.primary_padding_top, d.primary_padding_top, true),
            secondary_padding_top: resolve_padding("secondaryPaddingTop", s.secondary_padding_top, d.secondary_padding_top, true),
            // zero horizontal padding reads as unset
            padding_horizontal: resolve_padding("paddingHorizontal", s.padding_horizontal, d.padding_horizontal, false),
        }
    }

    /// The current line and the song title are drawn bold.
    pub fn primary_font(&self) -> FontSpec {
        FontSpec::bold(self.primary_font_size)
    }

    pub fn secondary_font(&self) -> FontSpec {
        FontSpec::regular(self.secondary_font_size)
    }

    /// Baseline row of the primary line in dual line layout.
    pub fn primary_baseline(&self) -> i32 {
        self.primary_padding_top + self.primary_font_size as i32
    }

    pub fn secondary_baseline(&self) -> i32 {
        self.secondary_padding_top + self.secondary_font_size as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = RenderOptions::from_settings(&RenderSettings::default());
        assert_eq!(o, RenderOptions::default());
        assert_eq!(o.palette.highlight, Rgb888::new(0xE6, 0x00, 0x26));
        assert_eq!(o.primary_baseline(), 23);
        assert_eq!(o.secondary_baseline(), 41);
        assert!(o.primary_font().bold);
        assert!(!o.secondary_font().bold);
    }

    #[test]
    fn test_host_json_settings() {
        let s: RenderSettings = serde_json::from_str(
            r##"{"showTranslation":false,"primaryColor":"#00FF00","primaryAlign":"center","primaryFontSize":"20","paddingHorizontal":4}"##,
        )
        .unwrap();
        let o = RenderOptions::from_settings(&s);
        assert!(!o.show_translation);
        assert!(o.highlight_word);
        assert_eq!(o.palette.primary, Rgb888::new(0, 0xFF, 0));
        assert_eq!(o.primary_align, Alignment::Center);
        assert_eq!(o.primary_font_size, 20);
        assert_eq!(o.padding_horizontal, 4);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let s: RenderSettings = serde_json::from_str(
            r##"{"highlightColor":"crimson","secondaryAlign":"justify","primaryFontSize":0,"secondaryFontSize":4000,"paddingHorizontal":0,"primaryPaddingTop":-3,"highlightWord":"sometimes"}"##,
        )
        .unwrap();
        let o = RenderOptions::from_settings(&s);
        let d = RenderOptions::default();
        assert_eq!(o.palette.highlight, d.palette.highlight);
        assert_eq!(o.secondary_align, Alignment::Left);
        assert_eq!(o.primary_font_size, 18);
        assert_eq!(o.secondary_font_size, 13);
        assert_eq!(o.padding_horizontal, 10);
        assert_eq!(o.primary_padding_top, 5);
        assert!(o.highlight_word);
    }

    #[test]
    fn test_overlay_prefers_top() {
        let base = RenderSettings { primary_color: Some("#111111".into()), padding_horizontal: Some(3), ..Default::default() };
        let top = RenderSettings { primary_color: Some("#222222".into()), ..Default::default() };
        let merged = base.overlay(top);
        assert_eq!(merged.primary_color.as_deref(), Some("#222222"));
        assert_eq!(merged.padding_horizontal, Some(3));
    }
}

/*
 *  display/fonts.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Pixel size to bitmap font resolution, with CJK fallback faces
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

use embedded_graphics::mono_font::{iso_8859_1::*, MonoFont};
use embedded_graphics::prelude::Point;
use u8g2_fonts::{fonts, types::VerticalPosition, FontRenderer};

use crate::constants::{ELLIPSIS, NOTE};

// (regular, bold), ascending by glyph height
const FONT_TABLE: &[(&MonoFont<'static>, &MonoFont<'static>)] = &[
    (&FONT_4X6, &FONT_4X6),
    (&FONT_5X7, &FONT_5X7),
    (&FONT_5X8, &FONT_5X8),
    (&FONT_6X9, &FONT_6X9),
    (&FONT_6X10, &FONT_6X10),
    (&FONT_6X12, &FONT_6X12),
    (&FONT_7X13, &FONT_7X13_BOLD),
    (&FONT_7X14, &FONT_7X14_BOLD),
    (&FONT_9X15, &FONT_9X15_BOLD),
    (&FONT_9X18, &FONT_9X18_BOLD),
    (&FONT_10X20, &FONT_10X20),
];

/// A requested text size, resolved to concrete fonts at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    pub size_px: u32,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size_px: u32) -> Self {
        Self { size_px, bold: false }
    }

    pub const fn bold(size_px: u32) -> Self {
        Self { size_px, bold: true }
    }

    /// Same weight, `delta` pixels larger.
    pub fn grow(self, delta: u32) -> Self {
        Self { size_px: self.size_px.saturating_add(delta), ..self }
    }

    /// Tallest mono font whose glyph height fits `size_px`, the smallest one otherwise.
    pub fn font(&self) -> &'static MonoFont<'static> {
        let row = FONT_TABLE
            .iter()
            .rev()
            .find(|(regular, _)| regular.character_size.height <= self.size_px)
            .unwrap_or(&FONT_TABLE[0]);
        if self.bold { row.1 } else { row.0 }
    }

    /// Mono font plus the wide faces used for chars it lacks.
    pub fn face(&self) -> Typeface {
        Typeface::new(self.font(), self.size_px)
    }
}

/// Where the pixels of one char come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSource {
    /// ISO 8859-1 mono font
    Mono,
    /// painted with primitives, see `draw.rs`
    Pixel,
    /// index into the wide faces
    Wide(usize),
    /// no face has it, drawn as the mono replacement glyph
    Missing,
}

/// Mono chars are the printable ISO 8859-1 range.
pub fn in_mono(ch: char) -> bool {
    matches!(ch, ' '..='~' | '\u{A0}'..='\u{FF}')
}

// GB2312 carries hanzi, kana and fullwidth punctuation; unifont fills in hangul
fn wqy_for(size_px: u32) -> FontRenderer {
    match size_px {
        0..=12 => FontRenderer::new::<fonts::u8g2_font_wqy12_t_gb2312>(),
        13 => FontRenderer::new::<fonts::u8g2_font_wqy13_t_gb2312>(),
        14 => FontRenderer::new::<fonts::u8g2_font_wqy14_t_gb2312>(),
        15 => FontRenderer::new::<fonts::u8g2_font_wqy15_t_gb2312>(),
        _ => FontRenderer::new::<fonts::u8g2_font_wqy16_t_gb2312>(),
    }
}

/// Resolved fonts of one text run.
pub struct Typeface {
    pub mono: &'static MonoFont<'static>,
    wide: [FontRenderer; 2],
}

impl Typeface {
    pub fn new(mono: &'static MonoFont<'static>, size_px: u32) -> Self {
        Self {
            mono,
            wide: [
                wqy_for(size_px),
                FontRenderer::new::<fonts::u8g2_font_unifont_t_korean2>(),
            ],
        }
    }

    /// Advance of one mono cell.
    pub fn cell(&self) -> u32 {
        self.mono.character_size.width + self.mono.character_spacing
    }

    pub(crate) fn wide(&self, index: usize) -> Option<&FontRenderer> {
        self.wide.get(index)
    }

    /// Face that paints `ch` and how far it advances the pen.
    pub fn resolve(&self, ch: char) -> (GlyphSource, u32) {
        if ch == ELLIPSIS || ch == NOTE {
            return (GlyphSource::Pixel, self.cell());
        }
        if in_mono(ch) {
            return (GlyphSource::Mono, self.cell());
        }
        let mut buf = [0u8; 4];
        let glyph: &str = ch.encode_utf8(&mut buf);
        for (i, face) in self.wide.iter().enumerate() {
            if let Ok(dims) = face.get_rendered_dimensions(glyph, Point::zero(), VerticalPosition::Baseline) {
                return (GlyphSource::Wide(i), dims.advance.x.max(0) as u32);
            }
        }
        (GlyphSource::Missing, self.cell())
    }

    pub fn source(&self, ch: char) -> GlyphSource {
        self.resolve(ch).0
    }

    pub fn advance(&self, ch: char) -> u32 {
        self.resolve(ch).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_resolution() {
        assert_eq!(FontSpec::regular(18).font().character_size.height, 18);
        assert_eq!(FontSpec::regular(20).font().character_size.width, 10);
        assert_eq!(FontSpec::regular(13).font().character_size.height, 13);
        assert_eq!(FontSpec::regular(16).font().character_size.height, 15);
        assert_eq!(FontSpec::regular(96).font().character_size.height, 20);
        assert_eq!(FontSpec::regular(1).font().character_size.height, 6);
    }

    #[test]
    fn test_bold_keeps_cell_size() {
        let r = FontSpec::regular(18).font();
        let b = FontSpec::bold(18).font();
        assert_eq!(r.character_size, b.character_size);
        assert_eq!(FontSpec::regular(18).grow(2).font().character_size.height, 20);
    }

    #[test]
    fn test_glyph_sources() {
        let face = FontSpec::bold(20).face();
        assert_eq!(face.source('A'), GlyphSource::Mono);
        assert_eq!(face.source('é'), GlyphSource::Mono);
        assert_eq!(face.source(ELLIPSIS), GlyphSource::Pixel);
        assert_eq!(face.source('我'), GlyphSource::Wide(0));
        assert_eq!(face.source('あ'), GlyphSource::Wide(0));
        assert_eq!(face.source('사'), GlyphSource::Wide(1));
        assert_eq!(face.source('\u{10330}'), GlyphSource::Missing);
    }

    #[test]
    fn test_advances() {
        let face = FontSpec::bold(20).face();
        assert_eq!(face.advance('A'), 10);
        assert_eq!(face.advance('\u{10330}'), 10);
        assert!(face.advance('我') > 0);
        assert!(face.advance('사') > 0);
        // wide faces follow the requested size
        assert!(FontSpec::regular(12).face().advance('我') < face.advance('我'));
    }
}

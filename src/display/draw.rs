/*
 *  display/draw.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text runs across mono, wide and hand-drawn glyphs
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

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use log::debug;
use u8g2_fonts::{
    types::{FontColor, VerticalPosition},
    FontRenderer,
};

use crate::constants::{ELLIPSIS, NOTE};
use super::field::Field;
use super::fonts::{in_mono, GlyphSource, Typeface};
use super::layout::{measure, truncate};

/// Paint the whole target with `color`.
pub fn fill_background<D>(target: &mut D, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(color)
}

/// Row of the top pixel of a glyph cell drawn at `y` with `baseline`.
pub fn cell_top(y: i32, font: &MonoFont<'_>, baseline: Baseline) -> i32 {
    let h = font.character_size.height;
    let offset = match baseline {
        Baseline::Top => 0,
        Baseline::Bottom => h.saturating_sub(1),
        Baseline::Middle => h.saturating_sub(1) / 2,
        Baseline::Alphabetic => font.baseline,
    };
    y - offset as i32
}

/// Draw `text` starting at `origin`, returning where the next char would go.
///
/// Runs the mono font covers go out as one `Text`; every other char is
/// drawn on its own, from a wide face, with primitives, or as `?` when
/// no face has it.
pub fn draw_run<D>(
    target: &mut D,
    text: &str,
    origin: Point,
    face: &Typeface,
    color: Rgb888,
    baseline: Baseline,
) -> Result<Point, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: core::fmt::Debug,
{
    let style = MonoTextStyle::new(face.mono, color);
    let mut pos = origin;
    let mut rest = text;

    while !rest.is_empty() {
        let split = rest.find(|ch: char| !in_mono(ch)).unwrap_or(rest.len());
        let (plain, tail) = rest.split_at(split);
        if !plain.is_empty() {
            pos = Text::with_baseline(plain, pos, style, baseline).draw(target)?;
        }
        let mut tail_chars = tail.chars();
        if let Some(ch) = tail_chars.next() {
            pos.x += draw_glyph(target, ch, pos, face, color, baseline)? as i32;
        }
        rest = tail_chars.as_str();
    }
    Ok(pos)
}

fn draw_glyph<D>(
    target: &mut D,
    ch: char,
    pos: Point,
    face: &Typeface,
    color: Rgb888,
    baseline: Baseline,
) -> Result<u32, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: core::fmt::Debug,
{
    let (source, advance) = face.resolve(ch);
    let top = cell_top(pos.y, face.mono, baseline);
    match (source, face_of(face, source)) {
        (GlyphSource::Pixel, _) => draw_pixel_glyph(target, ch, Point::new(pos.x, top), face.mono, color)?,
        (GlyphSource::Wide(_), Some(wide)) => {
            // wide glyphs share the mono baseline so mixed lines sit level
            let on_baseline = Point::new(pos.x, top + face.mono.baseline as i32);
            draw_wide_glyph(target, wide, ch, on_baseline, color)?;
        }
        _ => {
            let mut buf = [0u8; 4];
            let shown: &str = if source == GlyphSource::Mono { &*ch.encode_utf8(&mut buf) } else { "?" };
            Text::with_baseline(shown, pos, MonoTextStyle::new(face.mono, color), baseline).draw(target)?;
        }
    }
    Ok(advance)
}

fn face_of(face: &Typeface, source: GlyphSource) -> Option<&FontRenderer> {
    match source {
        GlyphSource::Wide(i) => face.wide(i),
        _ => None,
    }
}

fn draw_wide_glyph<D>(
    target: &mut D,
    wide: &FontRenderer,
    ch: char,
    on_baseline: Point,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: core::fmt::Debug,
{
    let mut buf = [0u8; 4];
    let glyph: &str = ch.encode_utf8(&mut buf);
    match wide.render(glyph, on_baseline, VerticalPosition::Baseline, FontColor::Transparent(color), target) {
        Ok(_) => Ok(()),
        Err(u8g2_fonts::Error::DisplayError(e)) => Err(e),
        Err(e) => {
            debug!("glyph {:?} not drawn: {:?}", ch, e);
            Ok(())
        }
    }
}

/// Truncate `text` to the field, align it and paint it in the field color.
pub fn draw_field_text<D>(target: &mut D, field: &Field, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: core::fmt::Debug,
{
    let face = field.face();
    let fitted = truncate(text, field.width, &face);
    if fitted.is_empty() {
        return Ok(());
    }
    let origin = field.origin_for(measure(&fitted, &face));
    draw_run(target, &fitted, origin, &face, field.fg_color, field.baseline)?;
    Ok(())
}

fn draw_pixel_glyph<D>(
    target: &mut D,
    glyph: char,
    top_left: Point,
    font: &MonoFont<'_>,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let Size { width: w, height: h } = font.character_size;
    let base_row = top_left.y + font.baseline as i32;
    match glyph {
        ELLIPSIS => {
            // three dots sitting on the baseline
            let dot = (w / 5).max(1);
            let fill = PrimitiveStyle::with_fill(color);
            for i in 0..3 {
                let cx = top_left.x + ((2 * i + 1) * w / 6) as i32;
                Rectangle::new(
                    Point::new(cx - dot as i32 / 2, base_row - dot as i32 + 1),
                    Size::new(dot, dot),
                )
                .into_styled(fill)
                .draw(target)?;
            }
        }
        NOTE => {
            let head = (w / 2).max(2);
            let head_top_left = Point::new(top_left.x, base_row - head as i32 + 1);
            Circle::new(head_top_left, head)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
            let stem_x = top_left.x + head as i32 - 1;
            let stem_top = top_left.y + (h / 5) as i32;
            let stroke = PrimitiveStyle::with_stroke(color, 1);
            Line::new(Point::new(stem_x, base_row - head as i32 / 2), Point::new(stem_x, stem_top))
                .into_styled(stroke)
                .draw(target)?;
            Line::new(
                Point::new(stem_x, stem_top),
                Point::new(top_left.x + w as i32 - 1, stem_top + (h / 5) as i32),
            )
            .into_styled(stroke)
            .draw(target)?;
        }
        _ => {}
    }
    Ok(())
}

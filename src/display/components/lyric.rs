/*
 *  display/components/lyric.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Lyric compositor - current line with karaoke fill, translation or next line
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

use std::cmp::Ordering;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Baseline;
use log::debug;

use crate::constants::{ELLIPSIS, SINGLE_LINE_FONT_BOOST};
use crate::display::draw::{draw_field_text, draw_run, fill_background};
use crate::display::field::Field;
use crate::display::framebuffer::Frame;
use crate::display::layout::measure;
use crate::display::options::RenderOptions;
use crate::highlight::HighlightClock;
use crate::lyrics::{LyricPosition, SongInfo};
use crate::segment::{segment, Segmentation};
use super::song_info::SongInfoPanel;

/// Which layout a render ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// No usable line: song identity or idle placeholder
    NoPosition,
    /// Current line over translation or next line
    DualLine,
    /// Current line alone, larger and vertically centered
    SingleLineCentered,
}

impl RenderState {
    pub fn select(position: Option<&LyricPosition>, options: &RenderOptions) -> Self {
        let Some(pos) = position else {
            return RenderState::NoPosition;
        };
        if pos.line_number().is_none() || pos.primary_text().is_none() {
            return RenderState::NoPosition;
        }
        if secondary_text(pos, options).is_some() {
            RenderState::DualLine
        } else {
            RenderState::SingleLineCentered
        }
    }
}

/// Translation when enabled and present, the next line otherwise.
pub fn secondary_text<'a>(pos: &'a LyricPosition, options: &RenderOptions) -> Option<&'a str> {
    let translation = pos
        .line
        .as_ref()
        .and_then(|l| l.translation())
        .filter(|_| options.show_translation);
    translation.or_else(|| pos.next_text())
}

/// Composes lyric frames for one surface size and option set.
///
/// Composition never fails; the only state it touches is the caller's
/// `HighlightClock`.
#[derive(Debug, Clone)]
pub struct LyricCompositor {
    options: RenderOptions,
    width: u32,
    height: u32,
}

impl LyricCompositor {
    pub fn new(options: RenderOptions, width: u32, height: u32) -> Self {
        Self { options, width: width.max(1), height: height.max(1) }
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Compose one frame at `now`.
    pub fn render(
        &self,
        position: Option<&LyricPosition>,
        song: Option<&SongInfo>,
        clock: &mut HighlightClock,
        now: Instant,
    ) -> Frame {
        let mut frame = Frame::new(self.width, self.height, self.options.palette.background);
        let Ok(()) = self.draw(&mut frame, position, song, clock, now);
        frame
    }

    /// Paint onto any RGB target of the compositor's size.
    pub fn draw<D>(
        &self,
        target: &mut D,
        position: Option<&LyricPosition>,
        song: Option<&SongInfo>,
        clock: &mut HighlightClock,
        now: Instant,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        D::Error: core::fmt::Debug,
    {
        fill_background(target, self.options.palette.background)?;

        let state = RenderState::select(position, &self.options);
        let pos = match (state, position) {
            (RenderState::NoPosition, _) | (_, None) => {
                return SongInfoPanel::new(&self.options, self.width, self.height).draw(target, song);
            }
            (_, Some(pos)) => pos,
        };
        let text = pos.primary_text().unwrap_or_default();

        match state {
            RenderState::DualLine => {
                let opts = &self.options;
                let primary = Field::new_text("primary", self.width, opts.padding_horizontal, opts.primary_font())
                    .anchor(opts.primary_baseline(), Baseline::Alphabetic)
                    .align(opts.primary_align);
                self.draw_current_line(target, &primary, text, pos, clock, now)?;

                if let Some(secondary) = secondary_text(pos, opts) {
                    let field = Field::new_text("secondary", self.width, opts.padding_horizontal, opts.secondary_font())
                        .anchor(opts.secondary_baseline(), Baseline::Alphabetic)
                        .align(opts.secondary_align)
                        .color(opts.palette.secondary);
                    draw_field_text(target, &field, secondary)?;
                }
                Ok(())
            }
            _ => {
                let opts = &self.options;
                let font = opts.primary_font().grow(SINGLE_LINE_FONT_BOOST);
                let primary = Field::new_text("primary", self.width, opts.padding_horizontal, font)
                    .anchor(self.height as i32 / 2, Baseline::Middle)
                    .align(opts.primary_align);
                self.draw_current_line(target, &primary, text, pos, clock, now)
            }
        }
    }

    fn draw_current_line<D>(
        &self,
        target: &mut D,
        field: &Field,
        text: &str,
        pos: &LyricPosition,
        clock: &mut HighlightClock,
        now: Instant,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        D::Error: core::fmt::Debug,
    {
        let seg = segment(text);
        match pos.word_number() {
            Some(word) if self.options.highlight_word && !seg.is_empty() => {
                self.draw_animated(target, field, &seg, pos, word, clock, now)
            }
            _ => {
                let field = field.clone().color(self.options.palette.highlight);
                draw_field_text(target, &field, text)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_animated<D>(
        &self,
        target: &mut D,
        field: &Field,
        seg: &Segmentation<'_>,
        pos: &LyricPosition,
        word: usize,
        clock: &mut HighlightClock,
        now: Instant,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        D::Error: core::fmt::Debug,
    {
        let palette = self.options.palette;
        let face = field.face();
        let joins = seg.script.joins_with_space();
        let space_width = measure(" ", &face);

        let widths: Vec<u32> = seg.units.iter().map(|u| measure(u, &face)).collect();
        let gaps = if joins { space_width * (seg.len() as u32 - 1) } else { 0 };
        let total: u32 = widths.iter().sum::<u32>() + gaps;

        // past the last unit everything is sung, nothing is filling
        let word_len = seg.get(word).map_or(0, |u| u.chars().count());
        let (line, word_id) = pos.highlight_pair();
        let progress = clock.observe(line, word_id, word_len, now);

        let mut x = field.origin_for(total.min(field.width)).x;
        let y = field.anchor_y;
        let right = field.right();

        for (i, (unit, &w)) in seg.units.iter().zip(&widths).enumerate() {
            if x + w as i32 > right {
                debug!("line overflows at unit {} of {}", i, seg.len());
                let mut buf = [0u8; 4];
                draw_run(target, ELLIPSIS.encode_utf8(&mut buf), Point::new(x, y), &face, palette.primary, field.baseline)?;
                break;
            }

            match i.cmp(&word) {
                Ordering::Less => {
                    draw_run(target, unit, Point::new(x, y), &face, palette.highlight, field.baseline)?;
                }
                Ordering::Equal => {
                    let mut cx = x;
                    let mut buf = [0u8; 4];
                    for (ci, ch) in unit.chars().enumerate() {
                        let color = match ci.cmp(&progress.highlighted) {
                            Ordering::Less => palette.highlight,
                            Ordering::Equal => palette.fill(progress.blend),
                            Ordering::Greater => palette.primary,
                        };
                        cx = draw_run(target, ch.encode_utf8(&mut buf), Point::new(cx, y), &face, color, field.baseline)?.x;
                    }
                }
                Ordering::Greater => {
                    draw_run(target, unit, Point::new(x, y), &face, palette.primary, field.baseline)?;
                }
            }
            x += w as i32;

            if joins && i + 1 < seg.len() {
                let color = if i < word { palette.highlight } else { palette.primary };
                draw_run(target, " ", Point::new(x, y), &face, color, field.baseline)?;
                x += space_width as i32;
            }
        }
        Ok(())
    }
}

/// One-shot render with a throwaway compositor.
pub fn render(
    position: Option<&LyricPosition>,
    song: Option<&SongInfo>,
    options: &RenderOptions,
    width: u32,
    height: u32,
    now: Instant,
    clock: &mut HighlightClock,
) -> Frame {
    LyricCompositor::new(options.clone(), width, height).render(position, song, clock, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fonts::GlyphSource;
    use crate::display::layout::{align_x, Alignment};
    use crate::lyrics::LyricLine;
    use std::time::Duration;

    fn opts() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_state_selection() {
        let o = opts();
        assert_eq!(RenderState::select(None, &o), RenderState::NoPosition);

        let single = LyricPosition::new(0, Some(0), LyricLine::new("la la"));
        assert_eq!(RenderState::select(Some(&single), &o), RenderState::SingleLineCentered);

        let translated = LyricPosition::new(0, Some(0), LyricLine::new("la la").with_translation("啦啦"));
        assert_eq!(RenderState::select(Some(&translated), &o), RenderState::DualLine);

        let no_translation = RenderOptions { show_translation: false, ..opts() };
        assert_eq!(RenderState::select(Some(&translated), &no_translation), RenderState::SingleLineCentered);

        let with_next = single.clone().with_next_line(LyricLine::new("next"));
        assert_eq!(RenderState::select(Some(&with_next), &no_translation), RenderState::DualLine);

        let negative = LyricPosition { line_index: Some(-1), ..single.clone() };
        assert_eq!(RenderState::select(Some(&negative), &o), RenderState::NoPosition);

        let empty = LyricPosition::new(3, Some(0), LyricLine::new(""));
        assert_eq!(RenderState::select(Some(&empty), &o), RenderState::NoPosition);
    }

    #[test]
    fn test_translation_preferred_over_next_line() {
        let pos = LyricPosition::new(0, None, LyricLine::new("a").with_translation("b"))
            .with_next_line(LyricLine::new("c"));
        assert_eq!(secondary_text(&pos, &opts()), Some("b"));
        let hidden = RenderOptions { show_translation: false, ..opts() };
        assert_eq!(secondary_text(&pos, &hidden), Some("c"));
    }

    #[test]
    fn test_static_line_leaves_clock_alone() {
        let comp = LyricCompositor::new(opts(), 480, 60);
        let mut clock = HighlightClock::new();
        let pos = LyricPosition::new(1, None, LyricLine::new("no word timing"));
        comp.render(Some(&pos), None, &mut clock, Instant::now());
        assert_eq!(clock.current_pair(), None);

        let off = LyricCompositor::new(RenderOptions { highlight_word: false, ..opts() }, 480, 60);
        let pos = LyricPosition::new(1, Some(0), LyricLine::new("disabled"));
        let frame = off.render(Some(&pos), None, &mut clock, Instant::now());
        assert_eq!(clock.current_pair(), None);
        assert!(frame.as_slice().contains(&opts().palette.highlight));
        assert!(!frame.as_slice().contains(&opts().palette.primary));
    }

    #[test]
    fn test_word_past_end_highlights_everything() {
        let comp = LyricCompositor::new(opts(), 480, 60);
        let mut clock = HighlightClock::new();
        let pos = LyricPosition::new(0, Some(9), LyricLine::new("two words"));
        let frame = comp.render(Some(&pos), None, &mut clock, Instant::now());
        assert_eq!(clock.current_pair(), Some((0, 9)));
        assert!(frame.as_slice().contains(&opts().palette.highlight));
        assert!(!frame.as_slice().contains(&opts().palette.primary));
    }

    #[test]
    fn test_overflow_paints_ellipsis_in_primary() {
        let comp = LyricCompositor::new(opts(), 120, 60);
        let mut clock = HighlightClock::new();
        // box is [10, 110) in 10px cells, "cccc" would start at 110
        let pos = LyricPosition::new(0, Some(5), LyricLine::new("aaaa bbbb cccc"));
        let frame = comp.render(Some(&pos), None, &mut clock, Instant::now());
        let primary = opts().palette.primary;
        let primary_cols: Vec<u32> = (0..120)
            .filter(|&x| (0..60).any(|y| frame.pixel(x, y) == Some(primary)))
            .collect();
        assert!(!primary_cols.is_empty());
        assert!(primary_cols.iter().all(|&x| (110..120).contains(&x)));
    }

    #[test]
    fn test_zero_surface_still_yields_frame() {
        let mut clock = HighlightClock::new();
        let pos = LyricPosition::new(0, Some(0), LyricLine::new("hi"));
        let frame = render(Some(&pos), None, &opts(), 0, 0, Instant::now(), &mut clock);
        assert_eq!((frame.width(), frame.height()), (1, 1));
    }

    fn inked(frame: &Frame, bg: Rgb888, x: u32, y: u32) -> bool {
        frame.pixel(x, y).is_some_and(|c| c != bg)
    }

    fn ink_columns(frame: &Frame, bg: Rgb888) -> Vec<u32> {
        (0..frame.width())
            .filter(|&x| (0..frame.height()).any(|y| inked(frame, bg, x, y)))
            .collect()
    }

    fn ink_rows(frame: &Frame, bg: Rgb888) -> Vec<u32> {
        (0..frame.height())
            .filter(|&y| (0..frame.width()).any(|x| inked(frame, bg, x, y)))
            .collect()
    }

    fn colors_between(frame: &Frame, bg: Rgb888, xs: std::ops::Range<u32>) -> Vec<Rgb888> {
        xs.flat_map(|x| (0..frame.height()).filter_map(move |y| frame.pixel(x, y)))
            .filter(|&c| c != bg)
            .collect()
    }

    #[test]
    fn test_single_line_is_centered_and_larger() {
        let o = RenderOptions { highlight_word: false, ..opts() };
        let bg = o.palette.background;
        let pos = LyricPosition::new(0, None, LyricLine::new("WWWW"));
        let frame = LyricCompositor::new(o, 480, 60).render(Some(&pos), None, &mut HighlightClock::new(), Instant::now());

        // a 20px cell hung around row 30
        let rows = ink_rows(&frame, bg);
        assert!(rows.iter().all(|&y| (21..41).contains(&y)), "rows {:?}", rows);
        let mid = (rows[0] + rows[rows.len() - 1]) as i32 / 2;
        assert!((mid - 30).abs() <= 4, "ink centered on {}", mid);

        // the fourth W ends in the fourth 10px cell, 9px cells stop short of it
        let cols = ink_columns(&frame, bg);
        assert!((46..50).contains(&cols[cols.len() - 1]), "cols end at {}", cols[cols.len() - 1]);
    }

    #[test]
    fn test_animated_line_follows_alignment() {
        for (align, start) in [(Alignment::Left, 10), (Alignment::Center, 190), (Alignment::Right, 370)] {
            assert_eq!(align_x(align, 10, 460, 100), start);
            let o = RenderOptions { primary_align: align, ..opts() };
            let bg = o.palette.background;
            let pos = LyricPosition::new(0, Some(1), LyricLine::new("I love you"));
            let frame = LyricCompositor::new(o, 480, 60).render(Some(&pos), None, &mut HighlightClock::new(), Instant::now());

            let cols = ink_columns(&frame, bg);
            let (first, last) = (cols[0] as i32, cols[cols.len() - 1] as i32);
            assert!((start..start + 10).contains(&first), "{} starts at {}", align, first);
            assert!(last < start + 100, "{} ends at {}", align, last);
        }
    }

    #[test]
    fn test_overflowing_line_aligns_on_the_box() {
        // content wider than the box aligns as if exactly box wide
        let o = RenderOptions { primary_align: Alignment::Center, ..opts() };
        let bg = o.palette.background;
        let pos = LyricPosition::new(0, Some(0), LyricLine::new("aaaa bbbb cccc"));
        let frame = LyricCompositor::new(o, 120, 60).render(Some(&pos), None, &mut HighlightClock::new(), Instant::now());
        let cols = ink_columns(&frame, bg);
        assert!((10..20).contains(&cols[0]), "starts at {}", cols[0]);
        assert!(cols[cols.len() - 1] < 120);
    }

    #[test]
    fn test_cjk_fill_walks_glyph_by_glyph() {
        let o = opts();
        let p = o.palette;
        let comp = LyricCompositor::new(o.clone(), 480, 60);
        let mut clock = HighlightClock::new();
        let t0 = Instant::now();
        let text = "我爱你中国";
        let pos = LyricPosition::new(2, Some(2), LyricLine::new(text));
        comp.render(Some(&pos), None, &mut clock, t0);
        let frame = comp.render(Some(&pos), None, &mut clock, t0 + Duration::from_millis(17));

        let face = o.primary_font().grow(SINGLE_LINE_FONT_BOOST).face();
        let mut x = 10u32;
        let cells: Vec<Vec<Rgb888>> = text
            .chars()
            .map(|ch| {
                assert!(matches!(face.source(ch), GlyphSource::Wide(_)), "{} has no glyph", ch);
                let adv = face.advance(ch);
                let colors = colors_between(&frame, p.background, x + 1..x + adv - 1);
                x += adv;
                colors
            })
            .collect();

        for sung in &cells[..2] {
            assert!(!sung.is_empty());
            assert!(sung.iter().all(|&c| c == p.highlight));
        }
        let filling = &cells[2];
        assert!(!filling.is_empty());
        assert!(filling.iter().all(|&c| c != p.highlight && c != p.primary));
        assert!(filling.contains(&p.fill(17.0 / 35.0)));
        for ahead in &cells[3..] {
            assert!(!ahead.is_empty());
            assert!(ahead.iter().all(|&c| c == p.primary));
        }
    }
}

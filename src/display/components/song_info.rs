/*
 *  display/components/song_info.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Song identity panel, shown while no lyric line is playing
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
use embedded_graphics::prelude::*;
use embedded_graphics::text::Baseline;
use log::debug;

use crate::constants::{IDLE_PLACEHOLDER, NOTE, PLACEHOLDER_FONT_SIZE};
use crate::display::draw::draw_field_text;
use crate::display::field::Field;
use crate::display::fonts::FontSpec;
use crate::display::layout::Alignment;
use crate::display::options::RenderOptions;
use crate::lyrics::SongInfo;

/// Title over "artist - album", or the idle placeholder.
#[derive(Debug, Clone)]
pub struct SongInfoPanel {
    title: Field,
    subtitle: Field,
    placeholder: Field,
}

impl SongInfoPanel {
    pub fn new(options: &RenderOptions, width: u32, height: u32) -> Self {
        let pad = options.padding_horizontal;
        let palette = options.palette;
        Self {
            title: Field::new_text("title", width, pad, options.primary_font())
                .anchor(options.primary_baseline(), Baseline::Alphabetic)
                .align(options.primary_align)
                .color(palette.highlight),
            subtitle: Field::new_text("subtitle", width, pad, options.secondary_font())
                .anchor(options.secondary_baseline(), Baseline::Alphabetic)
                .align(options.secondary_align)
                .color(palette.secondary),
            placeholder: Field::new_text("placeholder", width, 0, FontSpec::regular(PLACEHOLDER_FONT_SIZE))
                .anchor(height as i32 / 2, Baseline::Middle)
                .align(Alignment::Center)
                .color(palette.secondary),
        }
    }

    pub fn draw<D>(&self, target: &mut D, song: Option<&SongInfo>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        D::Error: core::fmt::Debug,
    {
        let Some(title) = song.and_then(SongInfo::title) else {
            debug!("no song known, idle placeholder");
            return draw_field_text(target, &self.placeholder, IDLE_PLACEHOLDER);
        };

        draw_field_text(target, &self.title, &format!("{} {}", NOTE, title))?;
        if let Some(artist_album) = song.and_then(SongInfo::artist_album) {
            draw_field_text(target, &self.subtitle, &artist_album)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::Frame;

    fn rows_with(frame: &Frame, color: Rgb888) -> Vec<u32> {
        (0..frame.height())
            .filter(|&y| frame.row(y).is_some_and(|r| r.contains(&color)))
            .collect()
    }

    #[test]
    fn test_title_and_subtitle() {
        let opts = RenderOptions::default();
        let mut frame = Frame::new(480, 60, opts.palette.background);
        SongInfoPanel::new(&opts, 480, 60)
            .draw(&mut frame, Some(&SongInfo::new("Yesterday").by("The Beatles").on("Help!")))
            .unwrap();

        let title_rows = rows_with(&frame, opts.palette.highlight);
        let sub_rows = rows_with(&frame, opts.palette.secondary);
        assert!(!title_rows.is_empty());
        assert!(!sub_rows.is_empty());
        assert!(title_rows.iter().all(|&y| y < 28));
        assert!(sub_rows.iter().all(|&y| y >= 28));
    }

    #[test]
    fn test_idle_placeholder_is_centered() {
        let opts = RenderOptions::default();
        let mut frame = Frame::new(480, 60, opts.palette.background);
        SongInfoPanel::new(&opts, 480, 60).draw(&mut frame, Some(&SongInfo::new(""))).unwrap();

        assert!(rows_with(&frame, opts.palette.highlight).is_empty());
        let cols: Vec<u32> = (0..480)
            .filter(|&x| (0..60).any(|y| frame.pixel(x, y) == Some(opts.palette.secondary)))
            .collect();
        let (first, last) = (cols[0] as i32, *cols.last().unwrap() as i32);
        assert!((first - (479 - last)).abs() <= 9, "placeholder spans {}..={}", first, last);

        let rows = rows_with(&frame, opts.palette.secondary);
        assert!(rows.contains(&30) || rows.contains(&29));
    }
}

/*
 *  display/field.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Declarative text slots of a key surface
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

use super::fonts::{FontSpec, Typeface};
use super::layout::{align_x, measure, Alignment};

/// One line of text on the surface.
///
/// A field spans `[left, left + width)` horizontally and hangs off
/// `anchor_y` according to its baseline.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field identifier (e.g. "primary", "secondary", "title")
    pub name: &'static str,

    /// Left edge of the text box
    pub left: i32,

    /// Width of the text box, zero when padding eats the surface
    pub width: u32,

    /// Vertical anchor, interpreted through `baseline`
    pub anchor_y: i32,

    pub baseline: Baseline,

    pub font: FontSpec,

    pub fg_color: Rgb888,

    /// Text alignment/justification within field
    pub alignment: Alignment,
}

impl Field {
    /// Text field spanning the surface between `padding` pixel margins.
    pub fn new_text(name: &'static str, surface_width: u32, padding: i32, font: FontSpec) -> Self {
        let width = (surface_width as i64 - 2 * padding as i64).max(0) as u32;
        Self {
            name,
            left: padding,
            width,
            anchor_y: 0,
            baseline: Baseline::Alphabetic,
            font,
            fg_color: Rgb888::new(0xFF, 0xFF, 0xFF),
            alignment: Alignment::Left,
        }
    }

    /// Builder: set anchor row and baseline
    pub fn anchor(mut self, y: i32, baseline: Baseline) -> Self {
        self.anchor_y = y;
        self.baseline = baseline;
        self
    }

    /// Builder: set alignment
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set text color
    pub fn color(mut self, fg: Rgb888) -> Self {
        self.fg_color = fg;
        self
    }

    /// Fonts resolved from the field's size.
    pub fn face(&self) -> Typeface {
        self.font.face()
    }

    /// Right edge, exclusive.
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    /// Where `text` starts once aligned, the caller having already fitted it.
    pub fn origin_for(&self, content_width: u32) -> Point {
        Point::new(align_x(self.alignment, self.left, self.width, content_width), self.anchor_y)
    }

    /// Width of `text` in this field's font.
    pub fn measure(&self, text: &str) -> u32 {
        measure(text, &self.face())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_between_margins() {
        let f = Field::new_text("primary", 480, 10, FontSpec::regular(18));
        assert_eq!((f.left, f.width, f.right()), (10, 460, 470));
    }

    #[test]
    fn test_padding_wider_than_surface() {
        let f = Field::new_text("primary", 15, 10, FontSpec::regular(18));
        assert_eq!(f.width, 0);
    }

    #[test]
    fn test_origin_follows_alignment() {
        let f = Field::new_text("primary", 480, 10, FontSpec::regular(20))
            .align(Alignment::Right)
            .anchor(30, Baseline::Middle);
        assert_eq!(f.origin_for(f.measure("abc")), Point::new(440, 30));
    }
}

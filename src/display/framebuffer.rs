/*
 *  display/framebuffer.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime sized RGB frame, the unit handed to a key surface
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

use core::convert::Infallible;
use std::path::Path;

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use tiny_skia::{IntSize, Pixmap};

use super::error::DisplayError;

/// A fully composed frame, row major, one `Rgb888` per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    buf: Vec<Rgb888>,
    w: usize,
    h: usize,
}

impl Frame {
    /// New frame filled with `fill`; zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32, fill: Rgb888) -> Self {
        let (w, h) = (width.max(1) as usize, height.max(1) as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> u32 { self.w as u32 }
    pub fn height(&self) -> u32 { self.h as u32 }

    /// Immutable raw access
    pub fn as_slice(&self) -> &[Rgb888] { &self.buf }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.idx(Point::new(x as i32, y as i32)).map(|i| self.buf[i])
    }

    /// Row `y` as a slice, for scanning in tests and sinks.
    pub fn row(&self, y: u32) -> Option<&[Rgb888]> {
        let y = y as usize;
        (y < self.h).then(|| &self.buf[y * self.w..(y + 1) * self.w])
    }

    /// Opaque RGBA bytes, row major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.buf.len() * 4);
        for c in &self.buf {
            out.extend_from_slice(&[c.r(), c.g(), c.b(), 0xFF]);
        }
        out
    }

    pub fn to_pixmap(&self) -> Result<Pixmap, DisplayError> {
        let size = IntSize::from_wh(self.width(), self.height())
            .ok_or(DisplayError::InvalidSurface { width: self.width(), height: self.height() })?;
        Pixmap::from_vec(self.to_rgba(), size)
            .ok_or_else(|| DisplayError::Encoding("pixel buffer does not match frame size".into()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, DisplayError> {
        self.to_pixmap()?
            .encode_png()
            .map_err(|e| DisplayError::Encoding(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), DisplayError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // colors follow area order, clip per point
        for (p, c) in area.points().zip(colors) {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else { return Ok(()) };
        let (x0, x1) = (area.top_left.x as usize, bottom_right.x as usize);
        for y in area.top_left.y as usize..=bottom_right.y as usize {
            let base = y * self.w;
            self.buf[base + x0..=base + x1].fill(color);
        }
        Ok(())
    }
}

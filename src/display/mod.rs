/*
 *  display/mod.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Rendering subsystem, pixels in, PNG out
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

pub mod error;
pub mod framebuffer;
pub mod color;

// text placement
pub mod fonts;
pub mod layout;
pub mod field;
pub mod draw;

pub mod options;

// UI components
pub mod components;

// Re-exports for convenience
pub use error::DisplayError;
pub use framebuffer::Frame;
pub use color::Palette;
pub use layout::Alignment;
pub use options::{RenderOptions, RenderSettings};

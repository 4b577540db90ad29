/*
 *  display/error.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types of the display subsystem
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

use thiserror::Error;

/// Errors raised when a composed frame leaves the renderer.
///
/// Composition itself never fails; only export to bytes or disk can.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("frame encoding failed: {0}")]
    Encoding(String),

    #[error("frame i/o: {0}")]
    Io(#[from] std::io::Error),
}

//! This module contains global constants shared by the renderer, the animator and the config layer.

use std::time::Duration;

/// Default width of a lyric key surface in pixels.
pub const DEFAULT_WIDTH: u32 = 480;
/// Default height of a lyric key surface in pixels.
pub const DEFAULT_HEIGHT: u32 = 60;

/// Time it takes one character of the active word to fill with the highlight color.
/// Fixed, the host does not push per-word durations.
pub const CHAR_INTERVAL: Duration = Duration::from_millis(35);

/// Tick of the animation ticker, roughly 60fps.
pub const LYRIC_ANIMATION_INTERVAL: Duration = Duration::from_millis(16);
/// How long the ticker keeps rendering after a word transition.
pub const LYRIC_ANIMATION_DURATION: Duration = Duration::from_millis(500);

// default palette
pub const DEFAULT_BACKGROUND: &str = "#1a1a1a";
pub const DEFAULT_PRIMARY: &str = "#FFFFFF";
pub const DEFAULT_SECONDARY: &str = "#888888";
pub const DEFAULT_HIGHLIGHT: &str = "#E60026";

/// Requested pixel size of the current lyric line.
pub const DEFAULT_PRIMARY_FONT_SIZE: u32 = 18;
/// Requested pixel size of the translation / next line.
pub const DEFAULT_SECONDARY_FONT_SIZE: u32 = 13;
/// Distance from the top edge to the top of the primary line.
pub const DEFAULT_PRIMARY_PADDING_TOP: i32 = 5;
/// Distance from the top edge to the top of the secondary line.
pub const DEFAULT_SECONDARY_PADDING_TOP: i32 = 28;
/// Left and right margin of both lines.
pub const DEFAULT_PADDING_HORIZONTAL: i32 = 10;

/// The lone current line is drawn this many pixels larger.
pub const SINGLE_LINE_FONT_BOOST: u32 = 2;
/// Upper bound accepted for any configured font size.
pub const MAX_FONT_SIZE: u32 = 96;

pub const PLACEHOLDER_FONT_SIZE: u32 = 16;
pub const IDLE_PLACEHOLDER: &str = "♪ Waiting for playback ♪";

/// Glyphs the bitmap fonts lack, painted with primitives instead.
pub const ELLIPSIS: char = '…';
pub const NOTE: char = '♪';

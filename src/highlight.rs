/*
 *  highlight.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Time anchor for the karaoke fill of the active word
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

use std::time::{Duration, Instant};
use log::debug;
use crate::constants::CHAR_INTERVAL;

/// How far the fill has travelled through the active word.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightProgress {
    /// Characters fully in the highlight color.
    pub highlighted: usize,
    /// Blend fraction (0..1) of the character right after the highlighted ones.
    pub blend: f32,
}

impl HighlightProgress {
    pub const START: HighlightProgress = HighlightProgress { highlighted: 0, blend: 0.0 };
}

#[derive(Clone, Copy, Debug)]
struct Anchor {
    line: i64,
    word: i64,
    word_len: usize,
    at: Instant,
}

/// Owned highlight state, one per rendered surface.
///
/// The anchor moves to `now` exactly when the observed (line, word) pair
/// changes; otherwise the elapsed time since the anchor drives the fill.
#[derive(Clone, Debug)]
pub struct HighlightClock {
    interval: Duration,
    anchor: Option<Anchor>,
}

impl Default for HighlightClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightClock {
    pub fn new() -> Self {
        Self::with_interval(CHAR_INTERVAL)
    }

    /// Clock with a custom per-character interval (never below 1ms).
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            anchor: None,
        }
    }

    /// Record a render of `(line, word)` at `now` and report the fill.
    pub fn observe(&mut self, line: i64, word: i64, word_len: usize, now: Instant) -> HighlightProgress {
        let anchor = match self.anchor {
            Some(a) if a.line == line && a.word == word => a,
            _ => {
                debug!("highlight anchor -> line {} word {} ({} chars)", line, word, word_len);
                self.anchor = Some(Anchor { line, word, word_len, at: now });
                return HighlightProgress::START;
            }
        };

        let elapsed = now.saturating_duration_since(anchor.at).as_nanos();
        let step = self.interval.as_nanos();
        let highlighted = (elapsed / step).min(anchor.word_len as u128) as usize;
        let blend = (elapsed % step) as f32 / step as f32;

        HighlightProgress { highlighted, blend }
    }

    /// The (line, word) pair currently anchored, if any.
    pub fn current_pair(&self) -> Option<(i64, i64)> {
        self.anchor.map(|a| (a.line, a.word))
    }

    pub fn anchor_time(&self) -> Option<Instant> {
        self.anchor.map(|a| a.at)
    }

    /// Forget the anchor, the next observe starts a fresh word.
    pub fn reset(&mut self) {
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_transition_starts_at_zero() {
        let mut clock = HighlightClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.observe(2, 1, 5, t0), HighlightProgress::START);
        assert_eq!(clock.current_pair(), Some((2, 1)));
        assert_eq!(clock.anchor_time(), Some(t0));
    }

    #[test]
    fn test_fill_follows_elapsed_time() {
        let mut clock = HighlightClock::new();
        let t0 = Instant::now();
        clock.observe(2, 1, 5, t0);

        let p = clock.observe(2, 1, 5, t0 + ms(90));
        assert_eq!(p.highlighted, 2);
        assert!((p.blend - 20.0 / 35.0).abs() < 1e-4);

        let p = clock.observe(2, 1, 5, t0 + ms(175));
        assert_eq!(p.highlighted, 5);
    }

    #[test]
    fn test_fill_clamps_at_word_length() {
        let mut clock = HighlightClock::new();
        let t0 = Instant::now();
        clock.observe(0, 0, 3, t0);
        assert_eq!(clock.observe(0, 0, 3, t0 + ms(10_000)).highlighted, 3);
    }

    #[test]
    fn test_new_pair_resets_regardless_of_timing() {
        let mut clock = HighlightClock::new();
        let t0 = Instant::now();
        clock.observe(2, 1, 5, t0);
        assert_eq!(clock.observe(2, 1, 5, t0 + ms(140)).highlighted, 4);

        // next word
        let t1 = t0 + ms(150);
        assert_eq!(clock.observe(2, 2, 4, t1), HighlightProgress::START);
        assert_eq!(clock.anchor_time(), Some(t1));
        assert_eq!(clock.observe(2, 2, 4, t1 + ms(36)).highlighted, 1);

        // same word index on another line is a new pair too
        assert_eq!(clock.observe(3, 2, 4, t1 + ms(400)), HighlightProgress::START);
    }

    #[test]
    fn test_clock_going_backwards_saturates() {
        let mut clock = HighlightClock::new();
        let t0 = Instant::now() + ms(1_000);
        clock.observe(1, 1, 4, t0);
        let p = clock.observe(1, 1, 4, t0 - ms(500));
        assert_eq!(p, HighlightProgress::START);
    }

    #[test]
    fn test_reset_forgets_anchor() {
        let mut clock = HighlightClock::new();
        let t0 = Instant::now();
        clock.observe(1, 0, 2, t0);
        clock.reset();
        assert_eq!(clock.current_pair(), None);
        assert_eq!(clock.observe(1, 0, 2, t0 + ms(100)), HighlightProgress::START);
    }
}

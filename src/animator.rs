/*
 *  animator.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Re-renders the lyric surface at a fixed tick after every word transition
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

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{watch, Mutex as TokMutex};
use tokio::task::{self, JoinHandle};
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::constants::{LYRIC_ANIMATION_DURATION, LYRIC_ANIMATION_INTERVAL};
use crate::display::components::LyricCompositor;
use crate::display::framebuffer::Frame;
use crate::display::options::RenderOptions;
use crate::highlight::HighlightClock;
use crate::player::{PlayerMessage, PlayerState, Redraw};

/// Where finished frames go, e.g. a key on the device.
///
/// `present` runs with the render lock held, at up to 60 fps while a word
/// fills; implementations hand the frame off rather than block on I/O.
pub trait FrameSink: Send + 'static {
    fn present(&mut self, frame: Frame);
}

/// Writes the latest frame over the same PNG file.
///
/// `present` only hands the frame over; a writer task encodes and writes it
/// on the blocking pool, skipping frames superseded in the meantime. Must be
/// created inside a tokio runtime.
pub struct PngFileSink {
    latest: watch::Sender<Option<Frame>>,
}

impl PngFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (latest, mut rx) = watch::channel::<Option<Frame>>(None);

        tokio::spawn(async move {
            // a value sent before the sink dropped is still written
            while rx.changed().await.is_ok() {
                let Some(frame) = rx.borrow_and_update().clone() else {
                    continue;
                };
                let target = path.clone();
                match task::spawn_blocking(move || frame.save_png(&target)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!("failed writing {}: {}", path.display(), e),
                    Err(e) => warn!("png writer for {} failed: {}", path.display(), e),
                }
            }
            debug!("png writer for {} closed", path.display());
        });

        Self { latest }
    }
}

impl FrameSink for PngFileSink {
    fn present(&mut self, frame: Frame) {
        self.latest.send_replace(Some(frame));
    }
}

/// State shared with the ticker task, locked for the length of one render.
struct Shared {
    player: PlayerState,
    clock: HighlightClock,
    compositor: LyricCompositor,
    sink: Box<dyn FrameSink>,
    last_pair: Option<(i64, i64)>,
}

impl Shared {
    fn render(&mut self) {
        // tokio's clock so paused test time drives the fill too
        let now = Instant::now().into_std();
        let frame = self.compositor.render(
            self.player.current_lyric.as_ref(),
            self.player.song.as_ref(),
            &mut self.clock,
            now,
        );
        self.sink.present(frame);
    }
}

/// Drives one lyric surface from state-sync messages.
pub struct LyricAnimator {
    shared: Arc<TokMutex<Shared>>,
    ticker: Option<JoinHandle<()>>,
}

impl LyricAnimator {
    pub fn new(compositor: LyricCompositor, sink: impl FrameSink) -> Self {
        let shared = Shared {
            player: PlayerState::new(),
            clock: HighlightClock::new(),
            compositor,
            sink: Box::new(sink),
            last_pair: None,
        };
        Self { shared: Arc::new(TokMutex::new(shared)), ticker: None }
    }

    /// Apply a message and redraw when it touched the lyric surface.
    pub async fn handle(&mut self, msg: PlayerMessage) -> Redraw {
        let mut guard = self.shared.lock().await;
        let s = &mut *guard;
        let redraw = s.player.apply(msg);
        if redraw == Redraw::None {
            return redraw;
        }

        let start_ticker = match s.player.current_lyric.as_ref() {
            Some(pos) if redraw == Redraw::Lyric => {
                let pair = pos.highlight_pair();
                let is_new = s.last_pair != Some(pair);
                s.last_pair = Some(pair);
                is_new && pair.1 >= 0
            }
            _ => false,
        };

        s.render();
        drop(guard); // release before spawning

        if start_ticker {
            self.spawn_ticker();
        }
        redraw
    }

    /// Render once with the current state.
    pub async fn redraw(&self) {
        self.shared.lock().await.render();
    }

    pub async fn set_options(&self, options: RenderOptions) {
        let mut s = self.shared.lock().await;
        s.compositor.set_options(options);
        s.render();
    }

    pub fn is_animating(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn spawn_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        let shared = Arc::clone(&self.shared);

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut tick = interval(LYRIC_ANIMATION_INTERVAL);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tick.tick().await; // the first tick is immediate

            loop {
                tick.tick().await;
                if started.elapsed() >= LYRIC_ANIMATION_DURATION {
                    break;
                }
                shared.lock().await.render();
            }
            debug!("lyric animation window closed");
        });

        self.ticker = Some(handle);
    }

    /// Stop a running animation, the last frame stays on the surface.
    pub fn stop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            debug!("lyric animation aborted.");
        }
    }
}

impl Drop for LyricAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::{LyricLine, LyricPosition};
    use std::sync::Mutex;
    use embedded_graphics::pixelcolor::Rgb888;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<Frame>>>);

    impl FrameSink for Collect {
        fn present(&mut self, frame: Frame) {
            self.0.lock().unwrap().push(frame);
        }
    }

    impl Collect {
        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    fn animator() -> (LyricAnimator, Collect) {
        let sink = Collect::default();
        let comp = LyricCompositor::new(RenderOptions::default(), 480, 60);
        (LyricAnimator::new(comp, sink.clone()), sink)
    }

    fn at(line: i64, word: i64) -> PlayerMessage {
        PlayerMessage::CurrentLyricUpdate(LyricPosition::new(line, Some(word), LyricLine::new("I love you")))
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_animates_for_a_bounded_window() {
        let (mut anim, sink) = animator();
        assert_eq!(anim.handle(at(0, 1)).await, Redraw::Lyric);
        assert_eq!(sink.count(), 1);
        assert!(anim.is_animating());

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(!anim.is_animating());
        // one immediate frame plus roughly 500 / 16 ticks
        let frames = sink.count();
        assert!((25..=35).contains(&frames), "got {} frames", frames);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_pair_does_not_restart() {
        let (mut anim, sink) = animator();
        anim.handle(at(0, 1)).await;
        tokio::time::sleep(Duration::from_millis(700)).await;
        let settled = sink.count();

        anim.handle(at(0, 1)).await;
        assert!(!anim.is_animating());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(sink.count(), settled + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_word_timing_renders_once() {
        let (mut anim, sink) = animator();
        anim.handle(at(3, -1)).await;
        assert!(!anim.is_animating());
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_aborts_ticker() {
        let (mut anim, sink) = animator();
        anim.handle(at(1, 0)).await;
        anim.stop();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(sink.count(), 1);
        assert!(!anim.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_timeline_is_not_rendered() {
        let (mut anim, sink) = animator();
        let t = PlayerMessage::parse(r#"{"type":"TimelineUpdate","data":{"currentTime":1000,"totalTime":2000}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(anim.handle(t.clone()).await, Redraw::Timeline);
        assert_eq!(anim.handle(t).await, Redraw::None);
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn test_png_sink_ends_on_latest_frame() {
        let path = std::env::temp_dir().join(format!("lyricdeck-sink-{}.png", std::process::id()));
        let mut sink = PngFileSink::new(path.clone());
        let stale = Frame::new(8, 4, Rgb888::new(0, 0, 0));
        let fresh = Frame::new(8, 4, Rgb888::new(0xE6, 0x00, 0x26));
        let expected = fresh.encode_png().unwrap();

        sink.present(stale);
        sink.present(fresh);

        let mut written = Vec::new();
        for _ in 0..200 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            written = std::fs::read(&path).unwrap_or_default();
            if written == expected {
                break;
            }
        }
        let _ = std::fs::remove_file(&path);
        assert_eq!(written, expected);
    }
}

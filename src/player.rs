/*
 *  player.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Player state as mirrored from the host's state-sync messages
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

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::deutils::{deserialize_lenient_bool, deserialize_lenient_i64, deserialize_lenient_string, millis_to_ms_string};
use crate::lyrics::{LyricPosition, LyricsDocument, SongInfo};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayStatus {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timeline {
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub current_time: Option<i64>,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub total_time: Option<i64>,
}

impl Timeline {
    /// "elapsed / total" in M:SS.
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            millis_to_ms_string(self.current_time.unwrap_or(0)),
            millis_to_ms_string(self.total_time.unwrap_or(0))
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayMode {
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub is_shuffling: Option<bool>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub repeat_mode: Option<String>,
}

/// Indicator of the play mode key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeIndicator {
    Sequential = 0,
    RepeatList = 1,
    RepeatOne = 2,
    Shuffle = 3,
}

impl PlayMode {
    pub fn indicator(&self) -> ModeIndicator {
        if self.is_shuffling.unwrap_or(false) {
            return ModeIndicator::Shuffle;
        }
        match self.repeat_mode.as_deref() {
            Some("List") => ModeIndicator::RepeatList,
            Some("Track" | "One" | "Single") => ModeIndicator::RepeatOne,
            _ => ModeIndicator::Sequential,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FullState {
    pub song: Option<SongInfo>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub play_state: Option<String>,
    pub timeline: Option<Timeline>,
    pub play_mode: Option<PlayMode>,
}

/// One state-sync message, `{"type": ..., "data": ...}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PlayerMessage {
    FullState(FullState),
    SongUpdate(SongInfo),
    PlayStateUpdate(PlayStatus),
    TimelineUpdate(Timeline),
    PlayModeUpdate(PlayMode),
    LyricUpdate(LyricsDocument),
    CurrentLyricUpdate(LyricPosition),
}

const KNOWN_TYPES: &[&str] = &[
    "FullState",
    "SongUpdate",
    "PlayStateUpdate",
    "TimelineUpdate",
    "PlayModeUpdate",
    "LyricUpdate",
    "CurrentLyricUpdate",
];

impl PlayerMessage {
    /// Parse one JSON line. Messages of an unknown type are `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<PlayerMessage>, serde_json::Error> {
        let mut value: Value = serde_json::from_str(line)?;
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default().to_string();
        if !KNOWN_TYPES.contains(&kind.as_str()) {
            debug!("ignoring message of type {:?}", kind);
            return Ok(None);
        }
        // a missing or null payload reads as an empty object
        if let Some(obj) = value.as_object_mut() {
            let data = obj.entry("data").or_insert(Value::Null);
            if data.is_null() {
                *data = Value::Object(Default::default());
            }
        }
        serde_json::from_value(value).map(Some)
    }
}

/// Which surfaces a message invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Lyric surfaces only
    Lyric,
    /// Surfaces that show elapsed time, the lyric one included
    Timeline,
    All,
}

/// The host's player as last reported.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub song: Option<SongInfo>,
    pub play_state: Option<String>,
    pub timeline: Timeline,
    pub play_mode: PlayMode,
    pub lyrics: LyricsDocument,
    pub current_lyric: Option<LyricPosition>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.play_state.as_deref() == Some("Playing")
    }

    pub fn apply(&mut self, msg: PlayerMessage) -> Redraw {
        match msg {
            PlayerMessage::FullState(full) => {
                info!(
                    "full state: {}",
                    full.song.as_ref().and_then(SongInfo::title).unwrap_or("no song")
                );
                self.song = full.song;
                self.play_state = full.play_state;
                self.timeline = full.timeline.unwrap_or_default();
                self.play_mode = full.play_mode.unwrap_or_default();
                Redraw::All
            }
            PlayerMessage::SongUpdate(song) => {
                info!("song: {}", song.title().unwrap_or("-"));
                self.song = Some(song);
                Redraw::All
            }
            PlayerMessage::PlayStateUpdate(s) => {
                debug!("play state: {:?}", s.status);
                self.play_state = s.status;
                Redraw::All
            }
            PlayerMessage::TimelineUpdate(t) => {
                if t == self.timeline {
                    return Redraw::None;
                }
                self.timeline = t;
                Redraw::Timeline
            }
            PlayerMessage::PlayModeUpdate(mode) => {
                debug!("play mode: {:?}", mode.indicator());
                self.play_mode = mode;
                Redraw::All
            }
            PlayerMessage::LyricUpdate(doc) => {
                info!("lyrics: {} lines, word timed {}", doc.lines.len(), doc.is_word_timed());
                self.lyrics = doc;
                Redraw::Lyric
            }
            PlayerMessage::CurrentLyricUpdate(pos) => {
                debug!(
                    "lyric position: line {:?} word {:?} {:?}",
                    pos.line_index,
                    pos.word_index,
                    pos.primary_text().unwrap_or_default()
                );
                self.current_lyric = Some(pos);
                Redraw::Lyric
            }
        }
    }
}

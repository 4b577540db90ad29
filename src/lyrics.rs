/*
 *  lyrics.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Lyric lines, playback positions and song identity as pushed by the host
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

use serde::{Deserialize, Serialize};
use crate::deutils::{
    deserialize_lenient_bool, deserialize_lenient_i64, deserialize_lenient_string, deserialize_text_or_empty,
};

/// One lyric line, immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    #[serde(
        rename = "originalLyric",
        alias = "originalText",
        default,
        deserialize_with = "deserialize_text_or_empty"
    )]
    pub original_text: String,

    #[serde(
        rename = "translatedLyric",
        alias = "translatedText",
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub translated_text: Option<String>,
}

impl LyricLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { original_text: text.into(), translated_text: None }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translated_text = Some(translation.into());
        self
    }

    /// Original text, None when empty.
    pub fn text(&self) -> Option<&str> {
        Some(self.original_text.as_str()).filter(|t| !t.is_empty())
    }

    /// Translation, None when absent or empty.
    pub fn translation(&self) -> Option<&str> {
        self.translated_text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Current playback position inside the lyrics.
///
/// Negative or missing indices mean the host has no granularity at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LyricPosition {
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub line_index: Option<i64>,

    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub word_index: Option<i64>,

    pub line: Option<LyricLine>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_line: Option<LyricLine>,
}

impl LyricPosition {
    pub fn new(line_index: i64, word_index: Option<i64>, line: LyricLine) -> Self {
        Self {
            line_index: Some(line_index),
            word_index,
            line: Some(line),
            next_line: None,
        }
    }

    pub fn with_next_line(mut self, next: LyricLine) -> Self {
        self.next_line = Some(next);
        self
    }

    /// Line index when present and non-negative.
    pub fn line_number(&self) -> Option<i64> {
        self.line_index.filter(|i| *i >= 0)
    }

    /// Word index when word level timing is available.
    pub fn word_number(&self) -> Option<usize> {
        self.word_index.filter(|i| *i >= 0).and_then(|i| usize::try_from(i).ok())
    }

    /// Text of the current line, None when missing or empty.
    pub fn primary_text(&self) -> Option<&str> {
        self.line.as_ref().and_then(LyricLine::text)
    }

    /// Text of the following line, None when missing or empty.
    pub fn next_text(&self) -> Option<&str> {
        self.next_line.as_ref().and_then(LyricLine::text)
    }

    /// The (line, word) pair the highlight clock anchors on.
    pub fn highlight_pair(&self) -> (i64, i64) {
        (self.line_index.unwrap_or(-1), self.word_index.unwrap_or(-1))
    }
}

/// Song identity, shown when no lyric position is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongInfo {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub song_name: Option<String>,

    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub author_name: Option<String>,

    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub album_name: Option<String>,
}

impl SongInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { song_name: Some(name.into()), ..Default::default() }
    }

    pub fn by(mut self, artist: impl Into<String>) -> Self {
        self.author_name = Some(artist.into());
        self
    }

    pub fn on(mut self, album: impl Into<String>) -> Self {
        self.album_name = Some(album.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.song_name.as_deref().filter(|s| !s.is_empty())
    }

    /// "artist - album", either part alone, or None.
    pub fn artist_album(&self) -> Option<String> {
        let artist = self.author_name.as_deref().filter(|s| !s.is_empty());
        let album = self.album_name.as_deref().filter(|s| !s.is_empty());
        match (artist, album) {
            (Some(a), Some(b)) => Some(format!("{} - {}", a, b)),
            (Some(a), None) => Some(a.to_string()),
            (None, Some(b)) => Some(b.to_string()),
            (None, None) => None,
        }
    }
}

/// Full lyric sheet of the current song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LyricsDocument {
    pub lines: Vec<LyricLine>,

    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub has_dynamic_lyric: Option<bool>,
}

impl LyricsDocument {
    /// Whether the host delivers word level positions for this song.
    pub fn is_word_timed(&self) -> bool {
        self.has_dynamic_lyric.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_host_json() {
        let json = r#"{
            "lineIndex": 3,
            "wordIndex": 1,
            "line": {"originalLyric": "I love you", "translatedLyric": "我爱你", "time": 12.5},
            "nextLine": {"originalLyric": "so much"}
        }"#;
        let pos: LyricPosition = serde_json::from_str(json).unwrap();
        assert_eq!(pos.line_number(), Some(3));
        assert_eq!(pos.word_number(), Some(1));
        assert_eq!(pos.primary_text(), Some("I love you"));
        assert_eq!(pos.line.as_ref().and_then(LyricLine::translation), Some("我爱你"));
        assert_eq!(pos.next_text(), Some("so much"));
        assert_eq!(pos.highlight_pair(), (3, 1));
    }

    #[test]
    fn test_position_without_word_timing() {
        let pos: LyricPosition =
            serde_json::from_str(r#"{"lineIndex": 0, "wordIndex": -1, "line": {"originalLyric": "la"}}"#).unwrap();
        assert_eq!(pos.word_number(), None);
        assert_eq!(pos.highlight_pair(), (0, -1));

        let pos: LyricPosition = serde_json::from_str(r#"{"line": {"originalLyric": null}}"#).unwrap();
        assert_eq!(pos.line_number(), None);
        assert_eq!(pos.primary_text(), None);
    }

    #[test]
    fn test_empty_translation_is_absent() {
        let line = LyricLine::new("hello").with_translation("");
        assert_eq!(line.translation(), None);
    }

    #[test]
    fn test_artist_album_combinations() {
        assert_eq!(SongInfo::new("t").by("A").on("B").artist_album().as_deref(), Some("A - B"));
        assert_eq!(SongInfo::new("t").by("A").artist_album().as_deref(), Some("A"));
        assert_eq!(SongInfo::new("t").on("B").artist_album().as_deref(), Some("B"));
        assert_eq!(SongInfo::new("t").artist_album(), None);
        assert_eq!(SongInfo::default().title(), None);
    }

    #[test]
    fn test_lyrics_document() {
        let doc: LyricsDocument = serde_json::from_str(
            r#"{"lines":[{"originalLyric":"a"},{"originalLyric":"b"}],"hasDynamicLyric":true}"#,
        )
        .unwrap();
        assert_eq!(doc.lines.len(), 2);
        assert!(doc.is_word_timed());
    }
}

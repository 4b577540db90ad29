/*
 *  segment.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Script aware splitting of a lyric line into highlight units
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

/// Writing system of a lyric line, decides how it is cut into units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    /// Ideographs, kana or hangul present: one unit per code point.
    Cjk,
    /// Everything else: whitespace separated words.
    LatinLike,
}

impl Script {
    /// A line is CJK as soon as a single qualifying code point shows up.
    pub fn classify(text: &str) -> Self {
        if text.chars().any(is_cjk) {
            Script::Cjk
        } else {
            Script::LatinLike
        }
    }

    /// Whether a space is synthesized between adjacent units when drawing.
    pub fn joins_with_space(self) -> bool {
        matches!(self, Script::LatinLike)
    }
}

/// CJK unified ideographs, hiragana, katakana and hangul syllables.
pub fn is_cjk(ch: char) -> bool {
    matches!(ch,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3040}'..='\u{309F}'
        | '\u{30A0}'..='\u{30FF}'
        | '\u{AC00}'..='\u{D7AF}')
}

/// Units of one line, borrowed from the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segmentation<'a> {
    pub script: Script,
    pub units: Vec<&'a str>,
}

impl<'a> Segmentation<'a> {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.units.get(index).copied()
    }

    /// Units glued back together the way they are drawn.
    pub fn rejoin(&self) -> String {
        match self.script {
            Script::Cjk => self.units.concat(),
            Script::LatinLike => self.units.join(" "),
        }
    }
}

/// Split `text` into highlight units.
pub fn segment(text: &str) -> Segmentation<'_> {
    let script = Script::classify(text);
    let units = match script {
        Script::Cjk => text
            .char_indices()
            .map(|(i, ch)| &text[i..i + ch.len_utf8()])
            .collect(),
        Script::LatinLike => text.split_whitespace().collect(),
    };
    Segmentation { script, units }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_per_code_point() {
        let seg = segment("你好");
        assert_eq!(seg.script, Script::Cjk);
        assert_eq!(seg.units, vec!["你", "好"]);
    }

    #[test]
    fn test_latin_words() {
        let seg = segment("hello world");
        assert_eq!(seg.script, Script::LatinLike);
        assert_eq!(seg.units, vec!["hello", "world"]);
    }

    #[test]
    fn test_mixed_line_is_cjk() {
        let seg = segment("你好 world");
        assert_eq!(seg.script, Script::Cjk);
        assert_eq!(seg.units, vec!["你", "好", " ", "w", "o", "r", "l", "d"]);
    }

    #[test]
    fn test_kana_and_hangul() {
        assert_eq!(Script::classify("ありがとう"), Script::Cjk);
        assert_eq!(Script::classify("カタカナ"), Script::Cjk);
        assert_eq!(Script::classify("사랑해"), Script::Cjk);
        assert_eq!(Script::classify("café olé"), Script::LatinLike);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(segment("").is_empty());
        assert!(segment("   \t ").is_empty());
    }

    #[test]
    fn test_astral_code_points_stay_whole() {
        // U+20000 sits outside the basic plane, the ideograph makes the line CJK
        let seg = segment("我𠀀");
        assert_eq!(seg.units, vec!["我", "𠀀"]);
    }

    #[test]
    fn test_rejoin_collapses_whitespace() {
        let text = "  I   love\tyou ";
        let seg = segment(text);
        assert_eq!(seg.rejoin(), "I love you");

        let text = "我爱你 baby";
        assert_eq!(segment(text).rejoin(), text);
    }
}

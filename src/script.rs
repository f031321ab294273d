//! Script classification for address text.

/// Writing system an address is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Kana or kanji present anywhere in the text.
    Japanese,
    /// Romanized (or otherwise non-Japanese) text.
    Latin,
}

impl Script {
    /// Classify a piece of text. A single kana or kanji is enough to make it Japanese.
    pub fn of(text: &str) -> Self {
        if text.chars().any(is_japanese_char) {
            Script::Japanese
        } else {
            Script::Latin
        }
    }
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' // hiragana
        | '\u{30A0}'..='\u{30FF}' // katakana
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3005}' // 々
        | '\u{3006}'
        | '\u{3012}' // 〒
    )
}

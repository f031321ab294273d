//! Address normalization.
//!
//! Turns a raw, user-typed address into the canonical form the candidate
//! generator cuts on: ASCII digits and hyphens, no building/floor/vicinity
//! qualifiers, and an explicit 丁目 unit for `N-M-K` block numbers.

use std::sync::LazyLock;

use regex::Regex;

use crate::prefecture::PREFECTURES;
use crate::script::Script;

/// A run of block/lot numbers such as `2-15-2`, `2丁目15番2号` or `22番地`.
static BLOCK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+(?:丁目|番地|番|号|-)(?:[0-9]+(?:丁目|番地|番|号|-)?)*")
        .expect("valid block regex")
});

static FLOOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:地下|B)?[0-9]{1,3} ?(?:F|f|階)").expect("valid floor regex"));

static FLOOR_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?(?:地下|B)?[0-9]{1,3} ?(?:F|f|階)$").expect("valid floor tail regex")
});

static BUILDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ビル|タワー|マンション|ハイツ|コーポ|レジデンス|ヒルズ|アパート|プラザ|会館|号室|号館|棟")
        .expect("valid building regex")
});

static VICINITY_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:付近|周辺|近辺|近く|辺り|あたり)$").expect("valid vicinity regex")
});

/// A postal code anywhere: marked with 〒, or a bare `NNN-NNNN` standing alone.
static POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"〒 ?[0-9]{3}-?[0-9]{4}|(?:^| )[0-9]{3}-[0-9]{4}(?: |$)").expect("valid postal code regex")
});

static LEADING_POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^〒? ?[0-9]{3}-?[0-9]{4} ?").expect("valid postal regex"));

/// Space left between a block unit and the next number (`2丁目 15-2`).
static SPLIT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(丁目|番地|番|号|-) +([0-9])").expect("valid split block regex"));

static THREE_PART_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)-([0-9]+-[0-9]+)").expect("valid three-part regex"));

static LATIN_QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|\s)(?:b?[0-9]{1,3}f|[0-9]{1,3}(?:st|nd|rd|th)?\s*floor|floor\s*[0-9]{1,3}|fl\.\s*[0-9]{1,3}|bldg\.?|building|tower|mansion|heights|room\s*[0-9]+|suite\s*[0-9]+)(?:$|\s)",
    )
    .expect("valid latin qualifier regex")
});

static LATIN_VICINITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:near|nearby|around)\s|\s(?:vicinity|area)$|^vicinity")
        .expect("valid latin vicinity regex")
});

static LATIN_FLOOR_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^b?[0-9]{1,3}f$").expect("valid floor token regex"));

/// Normalize a raw address. Idempotent and side-effect free.
pub fn normalize(raw: &str) -> String {
    let text = canonicalize_chars(raw);
    match Script::of(&text) {
        Script::Japanese => normalize_japanese(&text),
        Script::Latin => normalize_latin(&text),
    }
}

/// Drop anything in front of the address proper: a company name, a postal mark.
///
/// Starts the address at the earliest prefecture name; without one, only a
/// leading postal code is removed.
pub fn extract_address(text: &str) -> String {
    let earliest = PREFECTURES
        .iter()
        .filter_map(|pref| text.find(pref.name))
        .min();
    match earliest {
        Some(pos) => text[pos..].to_string(),
        None => LEADING_POSTAL_RE.replace(text, "").into_owned(),
    }
}

fn normalize_japanese(text: &str) -> String {
    let text = strip_postal_codes(text);
    let text = SPLIT_BLOCK_RE.replace_all(&text, "$1$2");
    let mut current = extract_address(&text).trim().to_string();
    loop {
        let next = strip_qualifiers_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    insert_chome(&current)
}

fn strip_qualifiers_once(text: &str) -> String {
    let mut text = text;

    if let Some(pos) = text.find(['(', '（']) {
        text = &text[..pos];
    }

    if let Some(run) = BLOCK_RUN_RE.find(text) {
        let tail = &text[run.end()..];
        if !tail.is_empty()
            && (tail.starts_with(' ') || BUILDING_RE.is_match(tail) || FLOOR_RE.is_match(tail))
        {
            text = &text[..run.end()];
        }
    } else if let Some(pos) = text.find(' ') {
        let tail = &text[pos..];
        if BUILDING_RE.is_match(tail) || FLOOR_RE.is_match(tail) {
            text = &text[..pos];
        }
    }

    let text = FLOOR_TAIL_RE.replace(text, "");
    let text = VICINITY_TAIL_RE.replace(&text, "");
    text.trim().to_string()
}

fn strip_postal_codes(text: &str) -> String {
    POSTAL_CODE_RE
        .replace_all(text, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `銀座2-15-2` becomes `銀座2丁目15-2` unless a 丁目 is already written out.
fn insert_chome(text: &str) -> String {
    if text.contains("丁目") {
        return text.to_string();
    }
    THREE_PART_BLOCK_RE.replacen(text, 1, "${1}丁目${2}").into_owned()
}

fn normalize_latin(text: &str) -> String {
    if !text.contains(',') {
        let kept: Vec<&str> = text
            .split_whitespace()
            .filter(|token| !LATIN_FLOOR_TOKEN_RE.is_match(token))
            .collect();
        if kept.is_empty() {
            return text.to_string();
        }
        return kept.join(" ");
    }

    let parts: Vec<String> = text
        .split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|part| !part.is_empty())
        .collect();
    let kept: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .filter(|part| !LATIN_QUALIFIER_RE.is_match(part) && !LATIN_VICINITY_RE.is_match(part))
        .collect();

    if kept.is_empty() {
        parts.join(", ")
    } else {
        kept.join(", ")
    }
}

/// Fold full-width forms and dash variants into ASCII, collapse whitespace.
pub fn canonicalize_chars(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());

    for (i, &c) in chars.iter().enumerate() {
        let mapped = match c {
            '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            '－' | '−' | '‐' | '‑' | '–' | '—' | '―' => '-',
            'ー' if is_digit_at(&chars, i.wrapping_sub(1)) && is_digit_at(&chars, i + 1) => '-',
            '，' => ',',
            '\u{3000}' => ' ',
            c if c.is_whitespace() => ' ',
            c => c,
        };
        out.push(mapped);
    }

    out.split(' ')
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_digit_at(chars: &[char], index: usize) -> bool {
    chars
        .get(index)
        .is_some_and(|c| c.is_ascii_digit() || ('０'..='９').contains(c))
}

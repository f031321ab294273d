//! The 47 Japanese prefectures.
//!
//! Used wherever a region has to be recognized or rendered in local script:
//! address parsing, romanized place-name detection and reverse lookups that
//! come back with ISO 3166-2 codes or English region names.

/// One prefecture: ISO 3166-2 code, romanized name, local-script name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefecture {
    pub code: &'static str,
    pub romaji: &'static str,
    pub name: &'static str,
}

const fn pref(code: &'static str, romaji: &'static str, name: &'static str) -> Prefecture {
    Prefecture { code, romaji, name }
}

pub const PREFECTURES: &[Prefecture] = &[
    pref("JP-01", "Hokkaido", "北海道"),
    pref("JP-02", "Aomori", "青森県"),
    pref("JP-03", "Iwate", "岩手県"),
    pref("JP-04", "Miyagi", "宮城県"),
    pref("JP-05", "Akita", "秋田県"),
    pref("JP-06", "Yamagata", "山形県"),
    pref("JP-07", "Fukushima", "福島県"),
    pref("JP-08", "Ibaraki", "茨城県"),
    pref("JP-09", "Tochigi", "栃木県"),
    pref("JP-10", "Gunma", "群馬県"),
    pref("JP-11", "Saitama", "埼玉県"),
    pref("JP-12", "Chiba", "千葉県"),
    pref("JP-13", "Tokyo", "東京都"),
    pref("JP-14", "Kanagawa", "神奈川県"),
    pref("JP-15", "Niigata", "新潟県"),
    pref("JP-16", "Toyama", "富山県"),
    pref("JP-17", "Ishikawa", "石川県"),
    pref("JP-18", "Fukui", "福井県"),
    pref("JP-19", "Yamanashi", "山梨県"),
    pref("JP-20", "Nagano", "長野県"),
    pref("JP-21", "Gifu", "岐阜県"),
    pref("JP-22", "Shizuoka", "静岡県"),
    pref("JP-23", "Aichi", "愛知県"),
    pref("JP-24", "Mie", "三重県"),
    pref("JP-25", "Shiga", "滋賀県"),
    pref("JP-26", "Kyoto", "京都府"),
    pref("JP-27", "Osaka", "大阪府"),
    pref("JP-28", "Hyogo", "兵庫県"),
    pref("JP-29", "Nara", "奈良県"),
    pref("JP-30", "Wakayama", "和歌山県"),
    pref("JP-31", "Tottori", "鳥取県"),
    pref("JP-32", "Shimane", "島根県"),
    pref("JP-33", "Okayama", "岡山県"),
    pref("JP-34", "Hiroshima", "広島県"),
    pref("JP-35", "Yamaguchi", "山口県"),
    pref("JP-36", "Tokushima", "徳島県"),
    pref("JP-37", "Kagawa", "香川県"),
    pref("JP-38", "Ehime", "愛媛県"),
    pref("JP-39", "Kochi", "高知県"),
    pref("JP-40", "Fukuoka", "福岡県"),
    pref("JP-41", "Saga", "佐賀県"),
    pref("JP-42", "Nagasaki", "長崎県"),
    pref("JP-43", "Kumamoto", "熊本県"),
    pref("JP-44", "Oita", "大分県"),
    pref("JP-45", "Miyazaki", "宮崎県"),
    pref("JP-46", "Kagoshima", "鹿児島県"),
    pref("JP-47", "Okinawa", "沖縄県"),
];

/// Look up by ISO 3166-2 code (`JP-13`).
pub fn by_code(code: &str) -> Option<&'static Prefecture> {
    let code = code.trim();
    PREFECTURES.iter().find(|p| p.code.eq_ignore_ascii_case(code))
}

/// Look up by romanized name, tolerating the usual suffixes
/// (`Tokyo`, `Tokyo-to`, `Kanagawa Prefecture`, `osaka-fu`).
pub fn by_romaji(name: &str) -> Option<&'static Prefecture> {
    let lower = name.trim().to_ascii_lowercase();
    let stem = ["-to", "-fu", "-ken", " prefecture", " pref.", " metropolis", " to", " fu", " ken"]
        .iter()
        .find_map(|suffix| lower.strip_suffix(suffix))
        .unwrap_or(lower.as_str())
        .trim();
    let stem = stem.replace('ō', "o").replace('ū', "u");
    PREFECTURES.iter().find(|p| p.romaji.eq_ignore_ascii_case(&stem))
}

/// Translate any region rendering (code, romanized or already local) into local script.
pub fn local_name(region: &str) -> Option<&'static str> {
    let region = region.trim();
    if region.is_empty() {
        return None;
    }
    PREFECTURES
        .iter()
        .find(|p| p.name == region)
        .or_else(|| by_code(region))
        .or_else(|| by_romaji(region))
        .map(|p| p.name)
}

/// Prefecture whose local name starts the given text.
pub fn leading(text: &str) -> Option<&'static Prefecture> {
    PREFECTURES.iter().find(|p| text.starts_with(p.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        assert_eq!(PREFECTURES.len(), 47);
        assert_eq!(PREFECTURES[12].name, "東京都");
    }

    #[test]
    fn test_local_name_from_code() {
        assert_eq!(local_name("JP-14"), Some("神奈川県"));
    }

    #[test]
    fn test_local_name_from_romaji_variants() {
        assert_eq!(local_name("Tokyo"), Some("東京都"));
        assert_eq!(local_name("Tokyo-to"), Some("東京都"));
        assert_eq!(local_name("Kanagawa Prefecture"), Some("神奈川県"));
        assert_eq!(local_name("osaka-fu"), Some("大阪府"));
        assert_eq!(local_name("Hyōgo"), Some("兵庫県"));
    }

    #[test]
    fn test_local_name_passthrough_and_unknown() {
        assert_eq!(local_name("京都府"), Some("京都府"));
        assert_eq!(local_name("Bavaria"), None);
        assert_eq!(local_name(""), None);
    }
}

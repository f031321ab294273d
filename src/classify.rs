//! Vehicle accessibility classifier.
//!
//! A pure decision over road facts and address text. [`RULES`] is walked in
//! order and the first rule that fires decides; when none fires, the
//! last-mile width decision is the verdict. Nothing here performs I/O or
//! logs.

use serde::Serialize;

use crate::normalize::canonicalize_chars;
use crate::parser::ParsedAddress;
use crate::road::{RoadSegment, RoadType};
use crate::vehicle::VehicleProfile;

/// Segments closer than this to the target are the final approach.
pub const NEAR_FIELD_RADIUS_M: f64 = 30.0;
/// Segments used when nothing lies inside the near field.
pub const FALLBACK_NEAREST: usize = 3;
/// Width margin above the vehicle minimum, in meters.
pub const WIDTH_MARGIN_M: f64 = 0.5;

const LOW_CONFIDENCE_NOTE: &str = "（30m以内に道路なし、最寄り道路による参考判定）";
const NO_DISTANCE_NOTE: &str = "（道路までの距離不明、周辺道路による参考判定）";

/// Keyword and the facility label cited in the reason.
type Keyword = (&'static str, &'static str);

const INDUSTRIAL_KEYWORDS: &[Keyword] = &[
    ("埠頭", "埠頭"),
    ("ふ頭", "埠頭"),
    ("岸壁", "岸壁"),
    ("コンテナターミナル", "コンテナターミナル"),
    ("港湾", "港湾施設"),
    ("南港", "港湾地区"),
    ("築港", "港湾地区"),
    ("臨海", "臨海地区"),
    ("工業団地", "工業団地"),
    ("産業団地", "工業団地"),
    ("工業地帯", "工業地帯"),
    ("流通団地", "流通団地"),
    ("工場", "工場"),
    ("物流センター", "物流センター"),
    ("流通センター", "物流センター"),
    ("配送センター", "物流センター"),
    ("倉庫", "倉庫"),
    ("container terminal", "コンテナターミナル"),
    ("wharf", "埠頭"),
    ("pier", "埠頭"),
    ("industrial park", "工業団地"),
    ("industrial estate", "工業団地"),
    ("factory", "工場"),
    ("logistics center", "物流センター"),
    ("distribution center", "物流センター"),
    ("warehouse", "倉庫"),
];

const BUILDING_KEYWORDS: &[&str] = &[
    "タワー",
    "ヒルズ",
    "ビル",
    "マンション",
    "百貨店",
    "ショッピングモール",
    "ショッピングセンター",
    "商業施設",
    "tower",
    "hills",
    "building",
    "bldg",
    "mall",
    "department store",
];

const COMMERCIAL_KEYWORDS: &[&str] = &[
    "銀座",
    "表参道",
    "竹下通り",
    "心斎橋",
    "道頓堀",
    "仲見世",
    "国際通り",
    "中華街",
    "商店街",
    "アーケード",
    "地下街",
    "ginza",
    "omotesando",
    "shinsaibashi",
    "dotonbori",
    "shopping street",
    "arcade",
];

const HISTORIC_KEYWORDS: &[&str] = &[
    "東山区",
    "祇園",
    "花見小路",
    "先斗町",
    "清水寺",
    "二年坂",
    "三年坂",
    "産寧坂",
    "嵐山",
    "谷中",
    "浅草",
    "小町通り",
    "伝統的建造物群",
    "gion",
    "asakusa",
    "higashiyama",
    "arashiyama",
];

const PUBLIC_FACILITY_KEYWORDS: &[&str] = &[
    "動物園",
    "水族館",
    "植物園",
    "遊園地",
    "公園",
    "競技場",
    "スタジアム",
    "美術館",
    "博物館",
    "図書館",
    "市役所",
    "区役所",
    "病院",
    "小学校",
    "中学校",
    "高等学校",
    "大学",
    "zoo",
    "aquarium",
    " park",
    "stadium",
    "museum",
    "library",
    "city hall",
    "hospital",
    "university",
];

const CORPORATE_MARKERS: &[&str] = &[
    "株式会社",
    "有限会社",
    "合同会社",
    "(株)",
    "（株）",
    "co., ltd",
    "co.,ltd",
    "inc.",
    "corporation",
    "k.k.",
];

const VICINITY_MARKERS: &[&str] = &["付近", "周辺", "近辺", "近く", "辺り", "near ", "nearby", "vicinity"];

/// Outcome of classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accessible: bool,
    pub reason: String,
}

impl Verdict {
    pub fn accessible(reason: impl Into<String>) -> Self {
        Self {
            accessible: true,
            reason: reason.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accessible: false,
            reason: reason.into(),
        }
    }
}

/// What the rules look at.
#[derive(Debug)]
pub struct Evidence<'a> {
    pub segments: &'a [RoadSegment],
    pub parsed: &'a ParsedAddress,
    pub vehicle: &'a VehicleProfile,
    /// Raw address plus parsed fields, lowercased for Latin keyword matching.
    pub text: String,
}

impl<'a> Evidence<'a> {
    pub fn new(
        segments: &'a [RoadSegment],
        parsed: &'a ParsedAddress,
        raw_address: &str,
        vehicle: &'a VehicleProfile,
    ) -> Self {
        let text = canonicalize_chars(&format!("{} {}", raw_address.trim(), parsed.joined())).to_lowercase();
        Self {
            segments,
            parsed,
            vehicle,
            text,
        }
    }

    fn find(&self, keywords: &[&'static str]) -> Option<&'static str> {
        keywords.iter().copied().find(|kw| self.text.contains(kw))
    }
}

/// A short-circuiting predicate. `None` passes to the next rule.
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Evidence<'_>) -> Option<Verdict>,
}

/// Name reported when no rule fires and road widths decide.
pub const WIDTH_RULE: &str = "road_width";

/// Rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "industrial_whitelist",
        apply: industrial_whitelist,
    },
    Rule {
        name: "high_rise_building",
        apply: high_rise_building,
    },
    Rule {
        name: "restricted_district",
        apply: restricted_district,
    },
    Rule {
        name: "public_facility",
        apply: public_facility,
    },
    Rule {
        name: "ambiguous_address",
        apply: ambiguous_address,
    },
    Rule {
        name: "no_road_data",
        apply: no_road_data,
    },
    Rule {
        name: "pedestrian_only",
        apply: pedestrian_only,
    },
];

/// A verdict and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub rule: &'static str,
    pub verdict: Verdict,
}

pub fn classify(
    segments: &[RoadSegment],
    parsed: &ParsedAddress,
    raw_address: &str,
    vehicle: &VehicleProfile,
) -> Verdict {
    decide(segments, parsed, raw_address, vehicle).verdict
}

/// Like [`classify`], also naming the deciding rule.
pub fn decide(
    segments: &[RoadSegment],
    parsed: &ParsedAddress,
    raw_address: &str,
    vehicle: &VehicleProfile,
) -> Decision {
    let evidence = Evidence::new(segments, parsed, raw_address, vehicle);
    RULES
        .iter()
        .find_map(|rule| {
            (rule.apply)(&evidence).map(|verdict| Decision {
                rule: rule.name,
                verdict,
            })
        })
        .unwrap_or_else(|| Decision {
            rule: WIDTH_RULE,
            verdict: judge_road_width(&evidence),
        })
}

fn industrial_whitelist(evidence: &Evidence<'_>) -> Option<Verdict> {
    let (_, label) = industrial_keyword(&evidence.text)?;
    Some(Verdict::accessible(format!(
        "港湾・工業地区（{label}）、{}の進入に対応可能",
        evidence.vehicle.name
    )))
}

fn industrial_keyword(text: &str) -> Option<Keyword> {
    INDUSTRIAL_KEYWORDS
        .iter()
        .copied()
        .find(|(kw, _)| text.contains(kw))
}

fn high_rise_building(evidence: &Evidence<'_>) -> Option<Verdict> {
    if industrial_keyword(&evidence.text).is_some() {
        return None;
    }
    let hit = floor_marker(&evidence.text).or_else(|| evidence.find(BUILDING_KEYWORDS))?;
    Some(Verdict::rejected(format!(
        "高層ビル・商業ビル内の住所（{hit}）、{}の横付け・荷役不可",
        evidence.vehicle.name
    )))
}

/// A floor designation such as `5F`, `B1F`, `12階` or `3rd floor`.
fn floor_marker(text: &str) -> Option<&'static str> {
    let chars: Vec<char> = text.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if !c.is_ascii_digit() || chars.get(i.wrapping_sub(1)).is_some_and(char::is_ascii_digit) {
            continue;
        }
        let mut end = i;
        while chars.get(end).is_some_and(char::is_ascii_digit) {
            end += 1;
        }
        if end - i > 3 {
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
        let lead_ok = match before {
            None => true,
            Some('b') => i < 2 || !chars[i - 2].is_ascii_alphabetic(),
            Some(p) => !p.is_ascii_alphabetic() && p != '-' && p != '.',
        };
        if !lead_ok {
            continue;
        }
        let tail: String = chars[end..].iter().take(8).collect();
        let tail = tail.trim_start();
        if tail.starts_with('階') {
            return Some("階数表記");
        }
        if let Some(after) = tail.strip_prefix('f') {
            if !after.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return Some("階数表記");
            }
        }
        if ["st floor", "nd floor", "rd floor", "th floor"]
            .iter()
            .any(|suffix| tail.starts_with(suffix))
        {
            return Some("階数表記");
        }
    }
    None
}

fn restricted_district(evidence: &Evidence<'_>) -> Option<Verdict> {
    let name = &evidence.vehicle.name;
    if let Some(hit) = evidence.find(COMMERCIAL_KEYWORDS) {
        return Some(Verdict::rejected(format!(
            "繁華街・商業地区（{hit}）、歩行者・交通規制により{name}進入困難"
        )));
    }
    let hit = evidence.find(HISTORIC_KEYWORDS)?;
    Some(Verdict::rejected(format!(
        "歴史的地区・観光保護エリア（{hit}）、{name}進入不可"
    )))
}

fn public_facility(evidence: &Evidence<'_>) -> Option<Verdict> {
    let hit = evidence.find(PUBLIC_FACILITY_KEYWORDS)?;
    Some(Verdict::rejected(format!(
        "公共施設（{}）、{}の進入・荷役不可（施設管理者への事前確認が必要）",
        hit.trim(),
        evidence.vehicle.name
    )))
}

fn ambiguous_address(evidence: &Evidence<'_>) -> Option<Verdict> {
    if !evidence.parsed.city.is_empty() {
        return None;
    }
    let has_number = evidence.text.chars().any(|c| c.is_ascii_digit());
    let bare_corporate = evidence.find(CORPORATE_MARKERS).is_some() && !has_number;
    let vague = evidence.find(VICINITY_MARKERS).is_some();

    (bare_corporate || vague).then(|| {
        Verdict::rejected("住所が曖昧（企業名のみ・「付近」表記）、番地までの正確な住所を入力してください")
    })
}

fn no_road_data(evidence: &Evidence<'_>) -> Option<Verdict> {
    if !evidence.segments.is_empty() {
        return None;
    }
    Some(if evidence.parsed.has_locality() {
        Verdict::rejected("周辺道路データ取得失敗（道路情報サービス応答なし）、手動確認を推奨")
    } else {
        Verdict::rejected("住所を特定できず周辺道路データなし、住所を確認してください")
    })
}

fn pedestrian_only(evidence: &Evidence<'_>) -> Option<Verdict> {
    evidence
        .segments
        .iter()
        .all(|segment| segment.road_type.is_pedestrian_only())
        .then(|| {
            Verdict::rejected(format!(
                "周辺は歩行者・自転車専用道のみ、{}進入不可",
                evidence.vehicle.name
            ))
        })
}

/// Segments forming the final approach, and whether the choice is low confidence.
pub fn last_mile<'s>(segments: &[&'s RoadSegment]) -> (Vec<&'s RoadSegment>, Option<&'static str>) {
    let mut measured: Vec<(&RoadSegment, f64)> = segments
        .iter()
        .filter_map(|segment| {
            segment
                .distance_m
                .filter(|d| d.is_finite())
                .map(|d| (*segment, d))
        })
        .collect();

    if measured.is_empty() {
        return (segments.to_vec(), Some(NO_DISTANCE_NOTE));
    }

    let near: Vec<&RoadSegment> = measured
        .iter()
        .filter(|(_, d)| *d <= NEAR_FIELD_RADIUS_M)
        .map(|(segment, _)| *segment)
        .collect();
    if !near.is_empty() {
        return (near, None);
    }

    measured.sort_by(|a, b| a.1.total_cmp(&b.1));
    let nearest = measured
        .into_iter()
        .take(FALLBACK_NEAREST)
        .map(|(segment, _)| segment)
        .collect();
    (nearest, Some(LOW_CONFIDENCE_NOTE))
}

fn judge_road_width(evidence: &Evidence<'_>) -> Verdict {
    let vehicle = evidence.vehicle;
    let name = &vehicle.name;
    let drivable: Vec<&RoadSegment> = evidence
        .segments
        .iter()
        .filter(|segment| !segment.road_type.is_pedestrian_only())
        .collect();
    let (approach, note) = last_mile(&drivable);
    let note = note.unwrap_or("");

    let widest_of = |keep: fn(RoadType) -> bool| {
        approach
            .iter()
            .filter(|segment| keep(segment.road_type))
            .max_by(|a, b| a.width_m().total_cmp(&b.width_m()))
            .copied()
    };

    if let Some(arterial) = widest_of(RoadType::is_arterial) {
        let width = arterial.width_m();
        if width >= vehicle.min_road_width_m {
            return Verdict::accessible(format!(
                "幹線道路（{}、幅員{width:.1}m）に直結、{name}の進入可能{note}",
                arterial.road_type.label()
            ));
        }
    }

    if approach.iter().all(|segment| segment.road_type.is_minor()) && vehicle.class.is_large() {
        let mut labels: Vec<&str> = approach.iter().map(|s| s.road_type.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        return Verdict::rejected(format!(
            "最終アクセス道路が{}のみ、{name}は旋回・路上駐車リスクにより進入不可{note}",
            labels.join("・")
        ));
    }

    if approach.iter().all(|segment| {
        segment.road_type == RoadType::Residential || segment.road_type.is_minor()
    }) {
        if let Some(residential) = widest_of(|t| t == RoadType::Residential) {
            let width = residential.width_m();
            let required = vehicle.residential_min_width_m;
            return if width < required {
                Verdict::rejected(format!(
                    "狭い住宅街道路（幅員{width:.1}m）、{name}は住宅街で{required:.1}m以上が必要{note}"
                ))
            } else {
                Verdict::accessible(format!(
                    "住宅街道路（幅員{width:.1}m）、{name}通行可能（路上駐車・歩行者に注意）{note}"
                ))
            };
        }
    }

    let Some(narrowest) = approach
        .iter()
        .map(|segment| segment.width_m())
        .min_by(f64::total_cmp)
    else {
        return Verdict::rejected(format!("通行可能な道路なし、{name}進入不可"));
    };

    let required = vehicle.min_road_width_m;
    if narrowest >= required + 2.0 * WIDTH_MARGIN_M {
        Verdict::accessible(format!(
            "最狭道路幅{narrowest:.1}m、{name}の通行に十分な幅員{note}"
        ))
    } else if narrowest >= required + WIDTH_MARGIN_M {
        Verdict::accessible(format!(
            "最狭道路幅{narrowest:.1}m、{name}通行可能（対向車とのすれ違いに注意）{note}"
        ))
    } else if narrowest >= required {
        Verdict::accessible(format!(
            "最狭道路幅{narrowest:.1}m、{name}通行可能だが余裕なし（誘導員の配置を推奨）{note}"
        ))
    } else {
        Verdict::rejected(format!(
            "最寄り道路幅{narrowest:.1}m、{name}には{required:.1}m以上が必要{note}"
        ))
    }
}

//! 能力词/风味词行首标题提取
//! 识别形如 `Landfall — Whenever ...` 或 `Bhaalspawn: ...` 的行首短标题：
//! 大写字母开头、不超过 40 字符的单词串，随后是长破折号或冒号，再接空白
//!
//! 仅识别长破折号与冒号两种分隔符，使用其他标点的标题不会被提取

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::stats::ExtractStats;
use crate::core::{Card, WordOccurrence};
use crate::utils::title_case;

static HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][\w'’\- /]{1,40})\s*(—|:)\s+").unwrap());
static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());
static BAD_PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s'\-/]").unwrap());

/// 萨加章节罗马数字
const ROMAN_NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
/// 费用动词前缀
const COST_PREFIXES: [&str; 6] = ["sacrifice", "discard", "pay", "exile", "tap", "untap"];
/// 风味词最多允许的单词数
const MAX_FLAVOR_WORDS: usize = 5;

/// 候选标题（一行文本命中标题模式）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCandidate {
    pub card_name: String,
    /// 标题文本（已去除首尾空白）
    pub header: String,
    /// 标题模式的完整命中片段（含分隔符）
    pub matched: String,
    pub full_line: String,
    pub oracle_text: String,
}

impl HeaderCandidate {
    fn into_occurrence(self) -> WordOccurrence {
        WordOccurrence {
            word: title_case(&self.header),
            card_name: self.card_name,
            full_line: self.full_line,
            oracle_text: self.oracle_text,
        }
    }
}

/// 风味词候选的拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RejectReason {
    #[serde(rename = "Mechanic word")]
    MechanicWord,
    #[serde(rename = "Saga chapter numeral")]
    SagaChapterNumeral,
    #[serde(rename = "Contains mana cost")]
    ContainsManaCost,
    #[serde(rename = "Starts with cost word")]
    StartsWithCostWord,
    #[serde(rename = "Matches card name")]
    MatchesCardName,
    #[serde(rename = "Too many words")]
    TooManyWords,
    #[serde(rename = "Contains digits or bad punctuation")]
    DigitsOrBadPunctuation,
    #[serde(rename = "Does not start with capital letter")]
    NotCapitalized,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectReason::MechanicWord => "Mechanic word",
            RejectReason::SagaChapterNumeral => "Saga chapter numeral",
            RejectReason::ContainsManaCost => "Contains mana cost",
            RejectReason::StartsWithCostWord => "Starts with cost word",
            RejectReason::MatchesCardName => "Matches card name",
            RejectReason::TooManyWords => "Too many words",
            RejectReason::DigitsOrBadPunctuation => "Contains digits or bad punctuation",
            RejectReason::NotCapitalized => "Does not start with capital letter",
        };
        f.write_str(label)
    }
}

/// 被拒绝的候选（审计记录）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedHeader {
    pub card_name: String,
    pub flavor_word: String,
    pub full_line: String,
    pub oracle_text: String,
    pub reject_reason: RejectReason,
}

/// 一次提取的完整结果
#[derive(Debug, Default)]
pub struct HeaderExtraction {
    pub accepted: Vec<WordOccurrence>,
    pub rejected: Vec<RejectedHeader>,
    pub stats: ExtractStats,
}

/// 行首标题扫描器
pub struct HeaderScanner;

impl HeaderScanner {
    /// 解析单行：返回 (标题, 完整命中片段)
    pub fn parse_line(line: &str) -> Option<(String, String)> {
        let caps = HEADER_REGEX.captures(line)?;
        let header = caps.get(1)?.as_str().trim().to_string();
        let matched = caps.get(0)?.as_str().to_string();
        Some((header, matched))
    }

    /// 扫描卡牌的每个卡面（无卡面时扫描卡牌本身）的每一行
    pub fn scan(card: &Card, stats: &mut ExtractStats) -> Vec<HeaderCandidate> {
        let mut candidates = Vec::new();
        stats.cards_scanned += 1;

        let sides: Vec<(&str, &str)> = if card.card_faces.is_some() {
            card.faces()
                .iter()
                .map(|face| {
                    let name = if face.name.is_empty() { card.name.as_str() } else { face.name.as_str() };
                    (name, face.oracle_text.as_deref().unwrap_or_default())
                })
                .collect()
        } else {
            vec![(card.name.as_str(), card.oracle_text.as_deref().unwrap_or_default())]
        };

        for (name, oracle) in sides {
            if oracle.is_empty() {
                continue;
            }
            stats.faces_scanned += 1;

            for line in oracle.split('\n') {
                stats.lines_scanned += 1;
                let stripped = line.trim();
                if let Some((header, matched)) = Self::parse_line(stripped) {
                    stats.headers_matched += 1;
                    candidates.push(HeaderCandidate {
                        card_name: name.to_string(),
                        header,
                        matched,
                        full_line: stripped.to_string(),
                        oracle_text: oracle.to_string(),
                    });
                }
            }
        }

        candidates
    }
}

/// 能力词提取器：标题（忽略大小写）必须属于官方能力词表
#[derive(Debug, Clone, Default)]
pub struct AbilityWordExtractor {
    vocabulary: FxHashSet<String>,
}

impl AbilityWordExtractor {
    pub fn new<I, S>(ability_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: ability_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn extract(&self, cards: &[Card]) -> HeaderExtraction {
        let mut extraction = HeaderExtraction::default();

        for card in cards {
            for candidate in HeaderScanner::scan(card, &mut extraction.stats) {
                if self.vocabulary.contains(&candidate.header.to_lowercase()) {
                    extraction.stats.accepted += 1;
                    extraction.accepted.push(candidate.into_occurrence());
                } else {
                    extraction.stats.not_in_vocabulary += 1;
                }
            }
        }

        extraction.stats.print_stats("ability words");
        extraction
    }
}

/// 风味词提取器：标题需通过拒绝过滤链，所有被拒候选记录原因
#[derive(Debug, Clone, Default)]
pub struct FlavorWordExtractor {
    mechanic_words: FxHashSet<String>,
}

impl FlavorWordExtractor {
    /// `mechanic_words`：能力词、关键字能力、关键字动作以及手工补充词
    pub fn new<I, S>(mechanic_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            mechanic_words: mechanic_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// 依次应用过滤规则，返回首个命中的拒绝原因；通过则返回 None
    pub fn classify(&self, candidate: &HeaderCandidate) -> Option<RejectReason> {
        let header = candidate.header.as_str();
        let header_lower = header.to_lowercase();

        if self.mechanic_words.contains(&header_lower) {
            return Some(RejectReason::MechanicWord);
        }
        if ROMAN_NUMERALS.contains(&header) {
            return Some(RejectReason::SagaChapterNumeral);
        }
        if candidate.matched.contains('{') || header.contains('{') {
            return Some(RejectReason::ContainsManaCost);
        }
        let first_word = header.split_whitespace().next().unwrap_or_default().to_lowercase();
        if COST_PREFIXES.contains(&first_word.as_str()) {
            return Some(RejectReason::StartsWithCostWord);
        }
        if header_lower == candidate.card_name.to_lowercase() {
            return Some(RejectReason::MatchesCardName);
        }
        if header.split_whitespace().count() > MAX_FLAVOR_WORDS {
            return Some(RejectReason::TooManyWords);
        }
        if DIGIT_REGEX.is_match(header) || BAD_PUNCTUATION_REGEX.is_match(header) {
            return Some(RejectReason::DigitsOrBadPunctuation);
        }
        if !header.chars().next().is_some_and(char::is_uppercase) {
            return Some(RejectReason::NotCapitalized);
        }
        None
    }

    pub fn extract(&self, cards: &[Card]) -> HeaderExtraction {
        let mut extraction = HeaderExtraction::default();

        for card in cards {
            if card.is_minigame() {
                log::debug!("Skipping minigame card: {}", card.name);
                extraction.stats.skipped_minigame += 1;
                continue;
            }

            for candidate in HeaderScanner::scan(card, &mut extraction.stats) {
                match self.classify(&candidate) {
                    Some(reason) => {
                        extraction.stats.record_rejection(reason);
                        extraction.rejected.push(RejectedHeader {
                            card_name: candidate.card_name,
                            flavor_word: candidate.header,
                            full_line: candidate.full_line,
                            oracle_text: candidate.oracle_text,
                            reject_reason: reason,
                        });
                    }
                    None => {
                        extraction.stats.accepted += 1;
                        extraction.accepted.push(candidate.into_occurrence());
                    }
                }
            }
        }

        extraction.stats.print_stats("flavor words");
        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardFace;

    fn candidate(card_name: &str, line: &str) -> HeaderCandidate {
        let (header, matched) = HeaderScanner::parse_line(line).expect("line should carry a header");
        HeaderCandidate {
            card_name: card_name.to_string(),
            header,
            matched,
            full_line: line.to_string(),
            oracle_text: line.to_string(),
        }
    }

    fn flavor_extractor() -> FlavorWordExtractor {
        FlavorWordExtractor::new(["Landfall", "Flying", "Scry", "visit"])
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            HeaderScanner::parse_line("Landfall — Whenever a land you control enters, draw a card."),
            Some(("Landfall".to_string(), "Landfall — ".to_string()))
        );
        assert_eq!(
            HeaderScanner::parse_line("Bhaalspawn: Whenever you sacrifice a creature"),
            Some(("Bhaalspawn".to_string(), "Bhaalspawn: ".to_string()))
        );
        assert_eq!(HeaderScanner::parse_line("landfall — lowercase start"), None);
        assert_eq!(HeaderScanner::parse_line("Landfall - ascii hyphen"), None);
        assert_eq!(HeaderScanner::parse_line("Flying"), None);
        assert_eq!(HeaderScanner::parse_line("{T}: Add {G}."), None);
    }

    #[test]
    fn test_parse_line_rejects_long_headers() {
        let long = format!("A{} — text", "b".repeat(45));
        assert_eq!(HeaderScanner::parse_line(&long), None);
    }

    #[test]
    fn test_ability_word_vocabulary() {
        let cards = vec![
            Card::with_oracle(
                "Lotus Cobra",
                "Landfall — Whenever a land you control enters, add one mana of any color.",
            ),
            Card::with_oracle("Random", "Bhaalspawn — Whenever you sacrifice a creature, draw."),
            Card::with_oracle("Shouty", "SPELL MASTERY — If there are two or more instants."),
        ];
        let extractor = AbilityWordExtractor::new(["landfall", "Spell mastery"]);
        let extraction = extractor.extract(&cards);

        let words: Vec<(&str, &str)> = extraction
            .accepted
            .iter()
            .map(|o| (o.word.as_str(), o.card_name.as_str()))
            .collect();
        assert_eq!(words, vec![("Landfall", "Lotus Cobra"), ("Spell Mastery", "Shouty")]);
        assert_eq!(extraction.stats.not_in_vocabulary, 1);
        assert!(extraction.rejected.is_empty());
    }

    #[test]
    fn test_scan_uses_face_names() {
        let card = Card {
            name: "Front // Back".into(),
            card_faces: Some(vec![
                CardFace {
                    name: "Front".into(),
                    oracle_text: Some("Flying\nCoven — At the beginning of combat".into()),
                    ..CardFace::default()
                },
                CardFace {
                    name: String::new(),
                    oracle_text: Some("Coven — Something else".into()),
                    ..CardFace::default()
                },
            ]),
            ..Card::default()
        };
        let mut stats = ExtractStats::default();
        let candidates = HeaderScanner::scan(&card, &mut stats);
        let names: Vec<&str> = candidates.iter().map(|c| c.card_name.as_str()).collect();
        assert_eq!(names, vec!["Front", "Front // Back"]);
        assert_eq!(stats.lines_scanned, 3);
        assert_eq!(stats.headers_matched, 2);
    }

    #[test]
    fn test_flavor_reject_reasons() {
        let extractor = flavor_extractor();
        let cases = [
            ("X", "Landfall — Whenever a land enters", Some(RejectReason::MechanicWord)),
            ("X", "Visit — Whenever you roll", Some(RejectReason::MechanicWord)),
            ("X", "IV — Return target creature", Some(RejectReason::SagaChapterNumeral)),
            ("X", "Sacrifice a creature: Draw a card.", Some(RejectReason::StartsWithCostWord)),
            ("X", "Exile Hand: Draw a card.", Some(RejectReason::StartsWithCostWord)),
            ("Grond", "Grond — This vehicle attacks", Some(RejectReason::MatchesCardName)),
            ("X", "One Two Three Four Five Six: stuff", Some(RejectReason::TooManyWords)),
            ("X", "Level 4: Flying", Some(RejectReason::DigitsOrBadPunctuation)),
            ("X", "Hero’s Reward — Gain 3 life", Some(RejectReason::DigitsOrBadPunctuation)),
            ("X", "Bhaalspawn — Whenever you sacrifice", None),
            ("X", "Council's Judgment — vote", None),
            ("X", "Half-Elf/Half-Orc — stuff", None),
        ];

        for (card_name, line, expected) in cases {
            let cand = candidate(card_name, line);
            assert_eq!(extractor.classify(&cand), expected, "line: {line}");
        }
    }

    #[test]
    fn test_flavor_mana_cost_and_capitalization_filters() {
        let extractor = flavor_extractor();
        let mana = HeaderCandidate {
            card_name: "X".into(),
            header: "Boost".into(),
            matched: "Boost {2} — ".into(),
            full_line: "Boost {2} — pump".into(),
            oracle_text: String::new(),
        };
        assert_eq!(extractor.classify(&mana), Some(RejectReason::ContainsManaCost));

        let lower = HeaderCandidate {
            card_name: "X".into(),
            header: "éclair".into(),
            matched: "éclair — ".into(),
            full_line: "éclair — text".into(),
            oracle_text: String::new(),
        };
        assert_eq!(extractor.classify(&lower), Some(RejectReason::NotCapitalized));
    }

    #[test]
    fn test_flavor_extract_records_rejections_and_skips_minigames() {
        let mut minigame = Card::with_oracle("Minigame Card", "Prize Wheel — Spin it.");
        minigame.set_type = Some("minigame".into());
        let cards = vec![
            Card::with_oracle(
                "Sarevok, Deathbringer",
                "Bhaalspawn — At the beginning of each player's end step\nLandfall — Whenever a land enters",
            ),
            minigame,
        ];

        let extraction = flavor_extractor().extract(&cards);
        assert_eq!(extraction.accepted.len(), 1);
        assert_eq!(extraction.accepted[0].word, "Bhaalspawn");
        assert_eq!(extraction.accepted[0].full_line, "Bhaalspawn — At the beginning of each player's end step");
        assert_eq!(extraction.rejected.len(), 1);
        assert_eq!(extraction.rejected[0].reject_reason, RejectReason::MechanicWord);
        assert_eq!(extraction.stats.skipped_minigame, 1);

        let audit = serde_json::to_value(&extraction.rejected[0]).unwrap();
        assert_eq!(audit["reject_reason"], "Mechanic word");
        assert_eq!(audit["flavor_word"], "Landfall");
    }
}

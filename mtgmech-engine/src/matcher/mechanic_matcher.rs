//! 机制匹配器
//! 给定机制名称，返回规则文本中以整词形式引用该机制的卡牌集合

use std::fmt;

use super::overrides::{dedupe_names, MatchOverrides};
use super::term_pattern::WholeWordPattern;
use crate::error::CoreResult;
use crate::indexer::OracleIndex;

/// 命中来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// 规则文本整词匹配
    Oracle,
    /// 补丁回退表
    Patch,
    /// 组合机制各成分的补丁结果合并
    CombinedPatch,
    /// 无命中
    None,
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchSource::Oracle => "oracle",
            MatchSource::Patch => "patch",
            MatchSource::CombinedPatch => "combined-patch",
            MatchSource::None => "none",
        };
        f.write_str(label)
    }
}

/// 匹配结果：完整卡牌集合（首次出现顺序，无重复）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub cards: Vec<String>,
    pub source: MatchSource,
}

impl MatchResult {
    fn empty() -> Self {
        Self {
            cards: Vec::new(),
            source: MatchSource::None,
        }
    }

    /// 完整命中数量（截断前）
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// 机制匹配器
#[derive(Debug)]
pub struct MechanicMatcher<'a> {
    index: &'a OracleIndex,
    overrides: MatchOverrides,
}

impl<'a> MechanicMatcher<'a> {
    pub fn new(index: &'a OracleIndex, overrides: MatchOverrides) -> Self {
        Self { index, overrides }
    }

    pub fn overrides(&self) -> &MatchOverrides {
        &self.overrides
    }

    /// 匹配流程：
    /// 1. 名称经覆盖表展开为一个或多个检索词条
    /// 2. 各词条在全部归一化规则文本中做整词匹配，结果取并集
    /// 3. 无命中 → 补丁表按小写名称回退
    /// 4. 仍无命中且为组合名称 → 合并各成分的补丁结果
    /// 5. 否则返回空集
    pub fn matches(&self, mechanic_name: &str) -> CoreResult<MatchResult> {
        let patterns = self
            .overrides
            .terms_for(mechanic_name)
            .iter()
            .map(|term| WholeWordPattern::compile(term))
            .collect::<CoreResult<Vec<_>>>()?;

        let hits = dedupe_names(
            self.index
                .entries()
                .iter()
                .filter(|entry| patterns.iter().any(|p| p.is_match(entry.normalized())))
                .map(|entry| entry.name.as_str()),
        );
        if !hits.is_empty() {
            return Ok(MatchResult {
                cards: hits,
                source: MatchSource::Oracle,
            });
        }

        if let Some(cards) = self.overrides.patch.lookup(mechanic_name) {
            log::trace!("Patch fallback hit for [{}]: {} cards", mechanic_name, cards.len());
            return Ok(MatchResult {
                cards,
                source: MatchSource::Patch,
            });
        }

        if let Some(parts) = self.overrides.constituents_of(mechanic_name) {
            let merged: Vec<String> = parts
                .iter()
                .filter_map(|part| self.overrides.patch.lookup(part))
                .flatten()
                .collect();
            let cards = dedupe_names(merged.iter().map(String::as_str));
            if !cards.is_empty() {
                return Ok(MatchResult {
                    cards,
                    source: MatchSource::CombinedPatch,
                });
            }
        }

        Ok(MatchResult::empty())
    }

    /// 判断词条是否以整词形式出现在整体语料中
    pub fn appears_in(corpus: &str, term: &str) -> CoreResult<bool> {
        Ok(WholeWordPattern::compile(term)?.is_match(corpus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;
    use crate::matcher::{CardRef, PatchTable};

    fn index(cards: &[(&str, &str)]) -> OracleIndex {
        let cards: Vec<Card> = cards.iter().map(|(n, o)| Card::with_oracle(*n, *o)).collect();
        OracleIndex::build(&cards)
    }

    #[test]
    fn test_whole_word_match() {
        let idx = index(&[
            ("Converted Thing", "Its mana value is converted."),
            ("Convertible", "Convert this card."),
        ]);
        let matcher = MechanicMatcher::new(&idx, MatchOverrides::default());
        let result = matcher.matches("convert").unwrap();
        assert_eq!(result.cards, vec!["Convertible".to_string()]);
        assert_eq!(result.source, MatchSource::Oracle);
    }

    #[test]
    fn test_multi_term_expansion_unions_results() {
        let idx = index(&[
            ("Tapper", "{T}: Tap target creature."),
            ("Untapper", "Untap target land."),
            ("Both", "Tap or untap target permanent."),
            ("Neither", "Draw a card."),
        ]);
        let matcher = MechanicMatcher::new(&idx, MatchOverrides::builtin());
        let result = matcher.matches("Tap and Untap").unwrap();
        assert_eq!(
            result.cards,
            vec!["Tapper".to_string(), "Untapper".to_string(), "Both".to_string()]
        );
    }

    #[test]
    fn test_duplicate_names_counted_once() {
        let idx = index(&[("Twin", "Flying"), ("Twin", "Flying, vigilance")]);
        let matcher = MechanicMatcher::new(&idx, MatchOverrides::default());
        let result = matcher.matches("Flying").unwrap();
        assert_eq!(result.card_count(), 1);
    }

    #[test]
    fn test_patch_fallback() {
        let idx = index(&[("Plain", "Draw a card.")]);
        let mut patch = PatchTable::new();
        patch.insert("Living Metal", vec![CardRef::Name("Ratchet, Field Medic".into())]);
        let overrides = MatchOverrides::builtin().with_patch_table(patch);
        let matcher = MechanicMatcher::new(&idx, overrides);

        let result = matcher.matches("Living metal").unwrap();
        assert_eq!(result.cards, vec!["Ratchet, Field Medic".to_string()]);
        assert_eq!(result.source, MatchSource::Patch);
    }

    #[test]
    fn test_oracle_hits_take_precedence_over_patch() {
        let idx = index(&[("Real", "Living metal (As long as it's your turn, this Vehicle is also a creature.)")]);
        let mut patch = PatchTable::new();
        patch.insert("living metal", vec![CardRef::Name("Patched".into())]);
        let matcher = MechanicMatcher::new(&idx, MatchOverrides::default().with_patch_table(patch));
        assert_eq!(matcher.matches("Living Metal").unwrap().cards, vec!["Real".to_string()]);
    }

    #[test]
    fn test_combined_patch_merge() {
        let idx = index(&[("Plain", "Draw a card.")]);
        let mut patch = PatchTable::new();
        patch.insert(
            "daybound",
            vec![
                CardRef::Name("Brutal Cathar".into()),
                CardRef::Record { name: "Tovolar's Huntmaster".into() },
            ],
        );
        patch.insert("nightbound", vec![CardRef::Name("Brutal Cathar".into())]);
        let matcher = MechanicMatcher::new(&idx, MatchOverrides::builtin().with_patch_table(patch));

        let result = matcher.matches("Daybound and Nightbound").unwrap();
        assert_eq!(result.source, MatchSource::CombinedPatch);
        assert_eq!(
            result.cards,
            vec!["Brutal Cathar".to_string(), "Tovolar's Huntmaster".to_string()]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let idx = index(&[("Plain", "Draw a card.")]);
        let matcher = MechanicMatcher::new(&idx, MatchOverrides::builtin());
        let result = matcher.matches("Banding").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.source, MatchSource::None);
        assert_eq!(result.card_count(), 0);
    }

    #[test]
    fn test_appears_in_corpus() {
        assert!(MechanicMatcher::appears_in("flying trample", "Trample").unwrap());
        assert!(!MechanicMatcher::appears_in("flying trampled", "trample").unwrap());
    }
}

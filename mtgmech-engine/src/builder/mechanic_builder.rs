//! 机制记录构建器
//! 每个来源条目生成一条候选记录：定义文本、规则编号（如有）、引用卡牌统计

use rustc_hash::FxHashMap;

use crate::core::{GlossaryTerm, Mechanic, MechanicType, RuleEntry, WordOccurrence};
use crate::error::{CoreError, CoreResult};
use crate::indexer::OracleIndex;
use crate::matcher::{MatchOverrides, MechanicMatcher};
use crate::utils::{preview_names, title_case};

/// 能力词统一定义（类别级，不针对具体机制）
pub const ABILITY_WORD_DESCRIPTION: &str =
    "Ability words appear in italics at the beginning of an ability and have no rules meaning.";
/// 风味词统一定义（类别级，不针对具体机制）
pub const FLAVOR_WORD_DESCRIPTION: &str =
    "Flavor words appear in italics before a rule line and are purely descriptive.";
/// 默认卡牌样本上限
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// 构建所需的全部来源
#[derive(Debug, Clone, Copy, Default)]
pub struct MechanicSources<'s> {
    pub keyword_abilities: &'s [RuleEntry],
    pub keyword_actions: &'s [RuleEntry],
    pub ability_words: &'s [WordOccurrence],
    pub flavor_words: &'s [WordOccurrence],
    pub glossary: &'s [GlossaryTerm],
}

/// 机制构建器
#[derive(Debug)]
pub struct MechanicBuilder<'a> {
    matcher: MechanicMatcher<'a>,
    corpus: String,
    sample_size: usize,
    candidates: Vec<Mechanic>,
}

impl<'a> MechanicBuilder<'a> {
    pub fn new(index: &'a OracleIndex, overrides: MatchOverrides) -> Self {
        Self {
            corpus: index.corpus_blob(),
            matcher: MechanicMatcher::new(index, overrides),
            sample_size: DEFAULT_SAMPLE_SIZE,
            candidates: Vec::new(),
        }
    }

    /// 设置卡牌样本上限
    pub fn sample_size(mut self, sample_size: usize) -> CoreResult<Self> {
        if sample_size == 0 {
            return Err(CoreError::InvalidInput("sample size must be at least 1".to_string()));
        }
        self.sample_size = sample_size;
        Ok(self)
    }

    /// 按固定顺序构建全部候选：关键字能力、关键字动作、能力词、风味词、术语表
    pub fn build_all(mut self, sources: MechanicSources<'_>) -> CoreResult<Vec<Mechanic>> {
        self.add_rule_entries(sources.keyword_abilities, MechanicType::KeywordAbility)?;
        self.add_rule_entries(sources.keyword_actions, MechanicType::KeywordAction)?;
        self.add_word_groups(sources.ability_words, MechanicType::AbilityWord, ABILITY_WORD_DESCRIPTION);
        self.add_word_groups(sources.flavor_words, MechanicType::FlavorWord, FLAVOR_WORD_DESCRIPTION);
        self.add_glossary_terms(sources.glossary)?;
        Ok(self.into_candidates())
    }

    /// 规则条目（关键字能力/动作）：定义取子条款拼接，卡牌来自匹配器
    pub fn add_rule_entries(&mut self, entries: &[RuleEntry], mechanic_type: MechanicType) -> CoreResult<usize> {
        let before = self.candidates.len();

        for entry in entries {
            let Some(name) = entry.display_name() else {
                log::warn!("Skipping {} entry without a name (code: {:?})", mechanic_type, entry.code);
                continue;
            };

            let definition = entry.definition().unwrap_or_else(|| {
                format!(
                    "{} is a {} in Magic: The Gathering.",
                    name,
                    mechanic_type.label().to_lowercase()
                )
            });
            let result = self.matcher.matches(name)?;
            log::trace!(
                "[{}] {} matched {} cards via {}: {}",
                mechanic_type,
                name,
                result.card_count(),
                result.source,
                preview_names(&result.cards, 3)
            );

            self.candidates.push(
                Mechanic::new(name, mechanic_type, definition)
                    .with_rule_code(entry.code.clone())
                    .with_cards(&result.cards, self.sample_size),
            );
        }

        let added = self.candidates.len() - before;
        log::debug!("Built {} {} candidates", added, mechanic_type);
        Ok(added)
    }

    /// 能力词/风味词：按标题化词条分组，卡牌集合直接取自出现记录（不经匹配器）
    /// 同一张卡上的重复出现只计一次，`card_count` 为不同卡名的数量
    pub fn add_word_groups(&mut self, occurrences: &[WordOccurrence], mechanic_type: MechanicType, description: &str) -> usize {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        let mut positions: FxHashMap<String, usize> = FxHashMap::default();

        for occurrence in occurrences {
            let word = title_case(occurrence.word.trim());
            if word.is_empty() {
                continue;
            }
            let slot = *positions.entry(word.clone()).or_insert_with(|| {
                groups.push((word, Vec::new()));
                groups.len() - 1
            });
            let cards = &mut groups[slot].1;
            if !cards.contains(&occurrence.card_name) {
                cards.push(occurrence.card_name.clone());
            }
        }

        let added = groups.len();
        for (word, cards) in groups {
            self.candidates
                .push(Mechanic::new(word, mechanic_type, description).with_cards(&cards, self.sample_size));
        }

        log::debug!("Built {} {} candidates from {} occurrences", added, mechanic_type, occurrences.len());
        added
    }

    /// 术语表：仅当小写词条以整词形式出现在整体语料中时收录
    pub fn add_glossary_terms(&mut self, terms: &[GlossaryTerm]) -> CoreResult<usize> {
        let before = self.candidates.len();
        let mut gated_out = 0usize;

        for term in terms {
            let name = title_case(term.term.trim());
            if name.is_empty() {
                log::warn!("Skipping glossary entry without a term");
                continue;
            }
            if !MechanicMatcher::appears_in(&self.corpus, &name.to_lowercase())? {
                gated_out += 1;
                continue;
            }

            let definition = term
                .definition()
                .unwrap_or_else(|| format!("{} is a glossary term.", name));
            let result = self.matcher.matches(&name)?;

            self.candidates.push(
                Mechanic::new(name, MechanicType::GlossaryTerm, definition)
                    .with_cards(&result.cards, self.sample_size),
            );
        }

        let added = self.candidates.len() - before;
        log::debug!(
            "Built {} glossary candidates | {} terms never appear in oracle text",
            added,
            gated_out
        );
        Ok(added)
    }

    pub fn candidates(&self) -> &[Mechanic] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<Mechanic> {
        self.candidates
    }
}

//! 卡牌集合整理：字段裁剪后的过滤，以及按规则身份去重（保留不同风味/插画的重印）

use rustc_hash::FxHashMap;

use crate::core::Card;

/// 规则身份：名称、规则文本、费用、类别行、版式
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RulesIdentity {
    name: String,
    oracle_text: Option<String>,
    mana_cost: Option<String>,
    type_line: Option<String>,
    layout: Option<String>,
}

impl RulesIdentity {
    fn of(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            oracle_text: non_empty(card.oracle_text.as_deref()),
            mana_cost: non_empty(card.mana_cost.as_deref()),
            type_line: non_empty(card.type_line.as_deref()),
            layout: non_empty(card.layout.as_deref()),
        }
    }
}

/// 首次出现印刷版本的外观特征
#[derive(Debug, Clone, PartialEq, Eq)]
struct Presentation {
    flavor_text: Option<String>,
    illustration_id: Option<String>,
}

impl Presentation {
    fn of(card: &Card) -> Self {
        Self {
            flavor_text: non_empty(card.flavor_text.as_deref()),
            illustration_id: non_empty(card.illustration_id.as_deref()),
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}

/// 卡牌集合整理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSetOutcome {
    pub cards: Vec<Card>,
    pub removed: usize,
}

/// 卡牌集合整理器
pub struct CardSet;

impl CardSet {
    /// 只保留带规则文本或卡面的卡牌（裁剪本身由 `Card` 的反序列化完成）
    pub fn trim(cards: Vec<Card>) -> CardSetOutcome {
        let total = cards.len();
        let cards: Vec<Card> = cards.into_iter().filter(Card::has_rules_content).collect();
        let removed = total - cards.len();
        log::debug!("Trimmed card set | kept {} | dropped {} without rules text", cards.len(), removed);
        CardSetOutcome { cards, removed }
    }

    /// 按规则身份去重；重复印刷仅当风味文本或插画与首次出现版本不同时保留
    pub fn dedupe_by_rules(cards: Vec<Card>) -> CardSetOutcome {
        let total = cards.len();
        let mut first_seen: FxHashMap<RulesIdentity, Presentation> = FxHashMap::default();
        let mut kept = Vec::new();

        for card in cards {
            let identity = RulesIdentity::of(&card);
            match first_seen.get(&identity) {
                None => {
                    first_seen.insert(identity, Presentation::of(&card));
                    kept.push(card);
                }
                Some(original) => {
                    if *original != Presentation::of(&card) {
                        kept.push(card);
                    }
                }
            }
        }

        let removed = total - kept.len();
        log::debug!(
            "Deduplicated card set | {} -> {} cards | {} rules identities",
            total,
            kept.len(),
            first_seen.len()
        );
        CardSetOutcome { cards: kept, removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printing(flavor: Option<&str>, illustration: Option<&str>) -> Card {
        Card {
            flavor_text: flavor.map(str::to_string),
            illustration_id: illustration.map(str::to_string),
            mana_cost: Some("{G}".into()),
            type_line: Some("Instant".into()),
            layout: Some("normal".into()),
            ..Card::with_oracle("Giant Growth", "Target creature gets +3/+3 until end of turn.")
        }
    }

    #[test]
    fn test_trim_drops_cards_without_text() {
        let cards = vec![
            Card::with_oracle("Fog Giant", "Flying"),
            Card {
                name: "Plains Token Art".into(),
                ..Card::default()
            },
        ];
        let outcome = CardSet::trim(cards);
        assert_eq!(outcome.cards.len(), 1);
        assert_eq!(outcome.removed, 1);
    }

    #[test]
    fn test_dedupe_keeps_new_art_and_flavor() {
        let cards = vec![
            printing(Some("Grow."), Some("art-1")),
            printing(Some("Grow."), Some("art-1")),
            printing(Some("Grow."), Some("art-2")),
            printing(Some("Bigger."), Some("art-1")),
            printing(Some("Grow."), Some("art-1")),
        ];
        let outcome = CardSet::dedupe_by_rules(cards);
        assert_eq!(outcome.cards.len(), 3);
        assert_eq!(outcome.removed, 2);
        assert_eq!(outcome.cards[1].illustration_id.as_deref(), Some("art-2"));
    }

    #[test]
    fn test_rules_changes_are_distinct_identities() {
        let mut errata = printing(None, None);
        errata.oracle_text = Some("Target creature gets +3/+3 until end of turn. Draw a card.".into());
        let outcome = CardSet::dedupe_by_rules(vec![printing(None, None), errata, printing(None, None)]);
        assert_eq!(outcome.cards.len(), 2);
    }
}

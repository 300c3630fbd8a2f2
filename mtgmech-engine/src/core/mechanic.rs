//! 机制输出模型
//! 最终落盘的唯一实体，名称在一次运行的输出中唯一

use std::fmt;

use serde::{Deserialize, Serialize};

/// 机制类别，声明顺序即优先级（越靠前优先级越高）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MechanicType {
    #[serde(rename = "Keyword Ability")]
    KeywordAbility,
    #[serde(rename = "Keyword Action")]
    KeywordAction,
    #[serde(rename = "Ability Word")]
    AbilityWord,
    #[serde(rename = "Flavor Word")]
    FlavorWord,
    #[serde(rename = "Glossary Term")]
    GlossaryTerm,
}

impl MechanicType {
    pub const ALL: [MechanicType; 5] = [
        MechanicType::KeywordAbility,
        MechanicType::KeywordAction,
        MechanicType::AbilityWord,
        MechanicType::FlavorWord,
        MechanicType::GlossaryTerm,
    ];

    /// 展示名称（与序列化值一致）
    pub fn label(self) -> &'static str {
        match self {
            MechanicType::KeywordAbility => "Keyword Ability",
            MechanicType::KeywordAction => "Keyword Action",
            MechanicType::AbilityWord => "Ability Word",
            MechanicType::FlavorWord => "Flavor Word",
            MechanicType::GlossaryTerm => "Glossary Term",
        }
    }

    /// 是否比另一类别优先级严格更高
    pub fn outranks(self, other: MechanicType) -> bool {
        self < other
    }
}

impl fmt::Display for MechanicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单条机制记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanic {
    pub name: String,
    #[serde(rename = "type")]
    pub mechanic_type: MechanicType,
    pub rule_code: Option<String>,
    pub definition: String,
    pub oracle_phrase_match: String,
    pub card_count: usize,
    pub cards: Vec<String>,
}

impl Mechanic {
    /// 以名称生成骨架记录，`oracle_phrase_match` 固定为小写名称
    pub fn new(name: impl Into<String>, mechanic_type: MechanicType, definition: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            oracle_phrase_match: name.to_lowercase(),
            name,
            mechanic_type,
            rule_code: None,
            definition: definition.into(),
            card_count: 0,
            cards: Vec::new(),
        }
    }

    pub fn with_rule_code(mut self, rule_code: Option<String>) -> Self {
        self.rule_code = rule_code;
        self
    }

    /// 写入卡牌统计：计数取完整集合大小，样本截断到 `sample_size`
    pub fn with_cards(mut self, cards: &[String], sample_size: usize) -> Self {
        self.card_count = cards.len();
        self.cards = cards.iter().take(sample_size).cloned().collect();
        self
    }

    /// 定义文本长度（按字符计）
    pub fn definition_len(&self) -> usize {
        self.definition.chars().count()
    }
}

impl fmt::Display for Mechanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({} cards)", self.name, self.mechanic_type, self.card_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(MechanicType::KeywordAbility.outranks(MechanicType::KeywordAction));
        assert!(MechanicType::KeywordAction.outranks(MechanicType::AbilityWord));
        assert!(MechanicType::AbilityWord.outranks(MechanicType::FlavorWord));
        assert!(MechanicType::FlavorWord.outranks(MechanicType::GlossaryTerm));
        assert!(!MechanicType::GlossaryTerm.outranks(MechanicType::GlossaryTerm));
        let mut sorted = MechanicType::ALL.to_vec();
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, MechanicType::ALL.to_vec());
    }

    #[test]
    fn test_card_count_reflects_full_set() {
        let cards: Vec<String> = (0..37).map(|i| format!("Card {i}")).collect();
        let mechanic = Mechanic::new("Landfall", MechanicType::AbilityWord, "x").with_cards(&cards, 10);
        assert_eq!(mechanic.card_count, 37);
        assert_eq!(mechanic.cards.len(), 10);
        assert_eq!(mechanic.cards[0], "Card 0");
    }

    #[test]
    fn test_serialized_shape() {
        let mechanic = Mechanic::new("Flying", MechanicType::KeywordAbility, "Evasion.")
            .with_rule_code(Some("702.9".into()))
            .with_cards(&["Fog Giant".to_string()], 10);
        let value = serde_json::to_value(&mechanic).unwrap();
        assert_eq!(value["type"], "Keyword Ability");
        assert_eq!(value["rule_code"], "702.9");
        assert_eq!(value["oracle_phrase_match"], "flying");
        assert_eq!(value["card_count"], 1);

        let glossary = Mechanic::new("Abandon", MechanicType::GlossaryTerm, "x");
        let value = serde_json::to_value(&glossary).unwrap();
        assert!(value["rule_code"].is_null());
        assert_eq!(value["cards"], serde_json::json!([]));
    }
}

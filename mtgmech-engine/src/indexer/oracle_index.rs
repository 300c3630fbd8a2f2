//! 规则文本索引
//! 将全部卡牌（及其卡面）展平为 (名称, 规则文本) 语料，供短语匹配使用

use crate::core::Card;
use crate::utils::normalize;

/// 索引条目：卡牌或卡面名称 + 规则文本（附带预先归一化的文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleIndexEntry {
    pub name: String,
    pub oracle: String,
    normalized: String,
}

impl OracleIndexEntry {
    pub fn new(name: impl Into<String>, oracle: impl Into<String>) -> Self {
        let oracle = oracle.into();
        Self {
            name: name.into(),
            normalized: normalize(&oracle),
            oracle,
        }
    }

    /// 归一化后的规则文本
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// 规则文本语料索引
#[derive(Debug, Clone, Default)]
pub struct OracleIndex {
    entries: Vec<OracleIndexEntry>,
}

impl OracleIndex {
    /// 按输入顺序建索引：
    /// 1. 顶层有规则文本 → 以卡名生成一条
    /// 2. 否则每个有文本的卡面各生成一条（以卡面名）
    /// 3. 两者皆无 → 跳过
    pub fn build(cards: &[Card]) -> Self {
        let mut entries = Vec::with_capacity(cards.len());
        let mut skipped = 0usize;

        for card in cards {
            if let Some(oracle) = card.oracle_text() {
                entries.push(OracleIndexEntry::new(card.name.as_str(), oracle));
                continue;
            }

            let before = entries.len();
            for face in card.faces() {
                if let Some(oracle) = face.oracle_text() {
                    entries.push(OracleIndexEntry::new(face.name.as_str(), oracle));
                }
            }
            if entries.len() == before {
                skipped += 1;
            }
        }

        log::debug!(
            "Oracle index built | Cards: {} | Entries: {} | Cards without text: {}",
            cards.len(),
            entries.len(),
            skipped
        );

        Self { entries }
    }

    pub fn entries(&self) -> &[OracleIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部归一化文本以空格拼接后的整体语料（术语表收录判定使用）
    pub fn corpus_blob(&self) -> String {
        self.entries
            .iter()
            .map(OracleIndexEntry::normalized)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! 卡牌数据模型
//! 仅存储卡牌数据，无任何业务逻辑；未声明字段在反序列化时直接丢弃，
//! 因此从完整批量数据反序列化为 `Card` 即完成字段裁剪

use serde::{Deserialize, Serialize};

/// 多面卡（双面/分割/模式双面）中的单个可印刷面
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
}

impl CardFace {
    /// 非空的规则文本
    pub fn oracle_text(&self) -> Option<&str> {
        non_empty(self.oracle_text.as_deref())
    }
}

/// 卡牌记录（只读输入，管线中从不修改）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produced_mana: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_faces: Option<Vec<CardFace>>,
}

impl Card {
    /// 快速创建仅含名称与规则文本的卡牌（测试与夹具使用）
    pub fn with_oracle(name: impl Into<String>, oracle_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oracle_text: Some(oracle_text.into()),
            ..Self::default()
        }
    }

    /// 顶层非空规则文本；裁剪后的多面卡顶层文本为空串，视为缺失
    pub fn oracle_text(&self) -> Option<&str> {
        non_empty(self.oracle_text.as_deref())
    }

    /// 卡面列表（无卡面时为空切片）
    pub fn faces(&self) -> &[CardFace] {
        self.card_faces.as_deref().unwrap_or(&[])
    }

    /// 是否拥有可用于建索引的文本（顶层文本或任意卡面）
    pub fn has_rules_content(&self) -> bool {
        self.oracle_text.is_some() || self.card_faces.is_some()
    }

    /// 是否为迷你游戏卡（不参与风味词提取）
    pub fn is_minigame(&self) -> bool {
        self.set_type.as_deref() == Some("minigame")
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

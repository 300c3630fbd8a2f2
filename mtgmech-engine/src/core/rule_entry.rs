//! 规则来源数据模型：关键字能力/动作规则条目、术语表词条、能力词/风味词出现记录

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 规则条目的子条款（如 702.9a）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

/// 规则定义的机制（关键字能力或关键字动作）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// 部分来源以 `term` 命名；两者同时存在时以 `name` 为准
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RuleEntry {
    /// 去除首尾空白后的名称：先取 `name`，缺失或为空时退回 `term`
    pub fn display_name(&self) -> Option<&str> {
        [self.name.as_deref(), self.term.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }

    /// 规范定义：子条款文本以空格拼接；无子条款时退回条目自身文本
    pub fn definition(&self) -> Option<String> {
        let joined = if self.subsections.is_empty() {
            self.text.as_deref().unwrap_or_default().trim().to_string()
        } else {
            self.subsections
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        };
        (!joined.is_empty()).then_some(joined)
    }
}

/// 术语表定义：单条或多条（编号定义拆分后）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Definitions {
    One(String),
    Many(Vec<String>),
}

impl Definitions {
    /// 多条定义以空格拼接
    pub fn joined(&self) -> String {
        match self {
            Definitions::One(text) => text.trim().to_string(),
            Definitions::Many(parts) => parts
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// 术语表词条
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    #[serde(default)]
    pub term: String,
    #[serde(rename = "definition(s)", default)]
    pub definitions: Option<Definitions>,
    /// 旧格式字段 `definitions`
    #[serde(rename = "definitions", default, skip_serializing_if = "Option::is_none")]
    pub legacy_definitions: Option<Definitions>,
}

impl GlossaryTerm {
    /// 非空的定义文本：先取 `definition(s)`，为空时退回 `definitions`
    pub fn definition(&self) -> Option<String> {
        [self.definitions.as_ref(), self.legacy_definitions.as_ref()]
            .into_iter()
            .flatten()
            .map(Definitions::joined)
            .find(|d| !d.is_empty())
    }
}

/// 出现记录所属的词类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    AbilityWord,
    FlavorWord,
}

impl WordKind {
    /// 输出文件中的字段名
    pub fn field_name(self) -> &'static str {
        match self {
            WordKind::AbilityWord => "ability_word",
            WordKind::FlavorWord => "flavor_word",
        }
    }
}

/// 能力词/风味词在某张卡上的一次出现
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOccurrence {
    #[serde(default)]
    pub card_name: String,
    #[serde(default, alias = "ability_word", alias = "flavor_word")]
    pub word: String,
    #[serde(default)]
    pub full_line: String,
    #[serde(default)]
    pub oracle_text: String,
}

impl WordOccurrence {
    /// 按词类字段名输出（`ability_word` / `flavor_word`）
    pub fn to_record(&self, kind: WordKind) -> Value {
        let mut record = json!({
            "card_name": self.card_name,
            "full_line": self.full_line,
            "oracle_text": self.oracle_text,
        });
        record[kind.field_name()] = Value::String(self.word.clone());
        record
    }
}

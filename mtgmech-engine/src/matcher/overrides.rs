//! 匹配覆盖配置
//! 将"多词条展开表"、"组合机制成分表"与"补丁回退表"建模为显式配置数据，
//! 注入匹配器，匹配算法本身不含任何特例分支

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 补丁表中的卡牌引用：纯名称，或带 `name` 字段的记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardRef {
    Name(String),
    Record {
        #[serde(default)]
        name: String,
    },
    Other(Value),
}

impl CardRef {
    /// 解包出卡名；无法识别的引用返回 None
    pub fn card_name(&self) -> Option<&str> {
        let name = match self {
            CardRef::Name(name) => name.as_str(),
            CardRef::Record { name } => name.as_str(),
            CardRef::Other(_) => return None,
        };
        let name = name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// 补丁回退表：小写机制词条 → 卡牌引用列表（由检索采集流程产出）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchTable(FxHashMap<String, Vec<CardRef>>);

impl PatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入条目（键统一为小写去空白）
    pub fn insert(&mut self, term: &str, cards: Vec<CardRef>) {
        self.0.insert(canonical_key(term), cards);
    }

    /// 按小写词条查询，返回去重后的卡名列表（保持首次出现顺序）；
    /// 词条不存在或列表为空时返回 None
    pub fn lookup(&self, term: &str) -> Option<Vec<String>> {
        let refs = self.0.get(&canonical_key(term))?;
        let names = dedupe_names(refs.iter().filter_map(CardRef::card_name));
        (!names.is_empty()).then_some(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 键统一转小写（从文件加载后调用）
    pub fn canonicalized(self) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(term, cards)| (canonical_key(&term), cards))
                .collect(),
        )
    }
}

/// 匹配覆盖配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOverrides {
    /// 展示名称 → 实际检索词条（一个名称可展开为多个词条）
    #[serde(default)]
    pub expansions: FxHashMap<String, Vec<String>>,
    /// 组合名称 → 成分机制（补丁表回退时合并各成分结果）
    #[serde(default)]
    pub combined: FxHashMap<String, Vec<String>>,
    /// 补丁回退表
    #[serde(default)]
    pub patch: PatchTable,
}

impl MatchOverrides {
    /// 内置覆盖表
    pub fn builtin() -> Self {
        let mut overrides = Self::default();
        overrides.add_expansion("tap and untap", &["tap", "untap"]);
        overrides.add_expansion("daybound and nightbound", &["daybound", "nightbound"]);
        overrides.add_expansion("endure", &["endure"]);
        overrides.add_expansion("convert", &["convert"]);
        overrides.add_combined("daybound and nightbound", &["daybound", "nightbound"]);
        overrides
    }

    pub fn add_expansion(&mut self, name: &str, terms: &[&str]) {
        self.expansions.insert(
            canonical_key(name),
            terms.iter().map(|t| canonical_key(t)).collect(),
        );
    }

    pub fn add_combined(&mut self, name: &str, parts: &[&str]) {
        self.combined.insert(
            canonical_key(name),
            parts.iter().map(|p| canonical_key(p)).collect(),
        );
    }

    pub fn with_patch_table(mut self, patch: PatchTable) -> Self {
        self.patch = patch.canonicalized();
        self
    }

    /// 以另一份配置覆盖本配置（同名键以 `other` 为准，补丁表非空时整体替换）
    pub fn merge(mut self, other: MatchOverrides) -> Self {
        for (name, terms) in other.expansions {
            self.expansions
                .insert(canonical_key(&name), terms.iter().map(|t| canonical_key(t)).collect());
        }
        for (name, parts) in other.combined {
            self.combined
                .insert(canonical_key(&name), parts.iter().map(|p| canonical_key(p)).collect());
        }
        if !other.patch.is_empty() {
            self.patch = other.patch.canonicalized();
        }
        self
    }

    /// 名称对应的检索词条；未配置时为名称本身
    pub fn terms_for(&self, name: &str) -> Vec<String> {
        let key = canonical_key(name);
        match self.expansions.get(&key) {
            Some(terms) if !terms.is_empty() => terms.clone(),
            _ => vec![key],
        }
    }

    /// 组合名称的成分列表
    pub fn constituents_of(&self, name: &str) -> Option<&[String]> {
        self.combined.get(&canonical_key(name)).map(Vec::as_slice)
    }
}

fn canonical_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 去重并保持首次出现顺序
pub(crate) fn dedupe_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = rustc_hash::FxHashSet::default();
    names
        .into_iter()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_table_unwraps_names_and_records() {
        let patch: PatchTable = serde_json::from_str(
            r#"{
                "Convert": [
                    "Optimus Prime, Hero",
                    {"object": "card", "name": "Bumblebee, Brave Friend", "set": "bot"},
                    "Optimus Prime, Hero",
                    {"object": "card"},
                    42
                ],
                "empty": []
            }"#,
        )
        .unwrap();
        let patch = patch.canonicalized();

        assert_eq!(
            patch.lookup("CONVERT"),
            Some(vec!["Optimus Prime, Hero".to_string(), "Bumblebee, Brave Friend".to_string()])
        );
        assert_eq!(patch.lookup("empty"), None);
        assert_eq!(patch.lookup("missing"), None);
    }

    #[test]
    fn test_builtin_expansions() {
        let overrides = MatchOverrides::builtin();
        assert_eq!(overrides.terms_for("Tap and Untap"), vec!["tap", "untap"]);
        assert_eq!(overrides.terms_for(" Flying "), vec!["flying"]);
        assert_eq!(
            overrides.constituents_of("Daybound and Nightbound"),
            Some(&["daybound".to_string(), "nightbound".to_string()][..])
        );
        assert!(overrides.constituents_of("flying").is_none());
    }

    #[test]
    fn test_merge_overrides_from_json() {
        let extra: MatchOverrides = serde_json::from_str(
            r#"{"expansions": {"Boast": ["boast"], "tap and untap": ["tap"]}}"#,
        )
        .unwrap();
        let merged = MatchOverrides::builtin().merge(extra);
        assert_eq!(merged.terms_for("boast"), vec!["boast"]);
        assert_eq!(merged.terms_for("tap and untap"), vec!["tap"]);
        assert_eq!(merged.terms_for("convert"), vec!["convert"]);
    }
}

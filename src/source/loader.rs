//! 输入加载器
//! 负责读取本地 JSON/文本输入；缺失或无法解析的输入均为致命错误

use std::fs;
use std::path::Path;

use mtgmech_engine::{Card, GlossaryTerm, MatchOverrides, PatchTable, RuleEntry, WordOccurrence};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{MechError, MechResult};

/// MTGJSON `Keywords.json` 的关键字目录
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCatalog {
    #[serde(default)]
    pub ability_words: Vec<String>,
    #[serde(default)]
    pub keyword_abilities: Vec<String>,
    #[serde(default)]
    pub keyword_actions: Vec<String>,
}

/// `{"data": {...}}` 外层包装
#[derive(Debug, Deserialize)]
struct KeywordsFile {
    data: KeywordCatalog,
}

impl KeywordCatalog {
    /// 风味词过滤使用的机制词表：三类关键字加手工补充词
    pub fn mechanic_words<'a>(&'a self, extra: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        self.ability_words
            .iter()
            .chain(&self.keyword_abilities)
            .chain(&self.keyword_actions)
            .chain(extra)
            .map(String::as_str)
    }
}

/// 输入加载器
pub struct SourceLoader;

impl SourceLoader {
    /// 读取并解析 JSON 文件
    pub fn load_json<T: DeserializeOwned>(path: &Path) -> MechResult<T> {
        let bytes = fs::read(path).map_err(|source| MechError::MissingInput {
            path: path.to_path_buf(),
            source,
        })?;
        let value = serde_json::from_slice(&bytes).map_err(|source| MechError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
        Ok(value)
    }

    /// 可选输入：文件不存在时返回 None，存在但无法解析仍报错
    pub fn load_optional_json<T: DeserializeOwned>(path: &Path) -> MechResult<Option<T>> {
        if !path.exists() {
            debug!("Optional input {} not present", path.display());
            return Ok(None);
        }
        Self::load_json(path).map(Some)
    }

    pub fn load_text(path: &Path) -> MechResult<String> {
        fs::read_to_string(path).map_err(|source| MechError::MissingInput {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_cards(path: &Path) -> MechResult<Vec<Card>> {
        Self::load_json(path)
    }

    pub fn load_rule_entries(path: &Path) -> MechResult<Vec<RuleEntry>> {
        Self::load_json(path)
    }

    pub fn load_glossary(path: &Path) -> MechResult<Vec<GlossaryTerm>> {
        Self::load_json(path)
    }

    pub fn load_word_occurrences(path: &Path) -> MechResult<Vec<WordOccurrence>> {
        Self::load_json(path)
    }

    /// 补丁表只能由远程采集生成，缺失时以空表继续；存在但无法解析仍报错
    pub fn load_patch_table(path: &Path) -> MechResult<PatchTable> {
        match Self::load_optional_json::<PatchTable>(path)? {
            Some(patch) => Ok(patch.canonicalized()),
            None => {
                warn!("Patch table {} not found, continuing without patch fallback", path.display());
                Ok(PatchTable::new())
            }
        }
    }

    /// 在 `base` 之上叠加可选的覆盖文件
    pub fn load_match_overrides(path: &Path, base: MatchOverrides) -> MechResult<MatchOverrides> {
        Ok(match Self::load_optional_json::<MatchOverrides>(path)? {
            Some(custom) => base.merge(custom),
            None => base,
        })
    }

    pub fn load_keyword_catalog(path: &Path) -> MechResult<KeywordCatalog> {
        Self::load_json::<KeywordsFile>(path).map(|file| file.data)
    }
}

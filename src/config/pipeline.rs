//! 管线配置：数据目录布局、各产物路径、远程选项

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::error::MechError;

/// 数据目录布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    /// 原始数据目录（批量卡牌、MTGJSON、规则文本）
    pub raw_dir: PathBuf,
    /// 整理后数据目录（规则条目、词表、最终数据集）
    pub static_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            static_dir: PathBuf::from("data/static"),
        }
    }
}

/// 管线读写的所有文件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    BulkCards,
    TrimmedCards,
    DedupedCards,
    KeywordCatalog,
    CompRulesText,
    WikiPage,
    KeywordAbilityRules,
    KeywordActionRules,
    GlossaryTerms,
    AbilityWords,
    AbilityWordsSorted,
    FlavorWords,
    FlavorWordsSorted,
    FlavorWordsRejected,
    PatchTable,
    MatchOverrides,
    WikiMechanics,
    Mechanics,
}

impl Artifact {
    pub const ALL: [Artifact; 18] = [
        Artifact::BulkCards,
        Artifact::TrimmedCards,
        Artifact::DedupedCards,
        Artifact::KeywordCatalog,
        Artifact::CompRulesText,
        Artifact::WikiPage,
        Artifact::KeywordAbilityRules,
        Artifact::KeywordActionRules,
        Artifact::GlossaryTerms,
        Artifact::AbilityWords,
        Artifact::AbilityWordsSorted,
        Artifact::FlavorWords,
        Artifact::FlavorWordsSorted,
        Artifact::FlavorWordsRejected,
        Artifact::PatchTable,
        Artifact::MatchOverrides,
        Artifact::WikiMechanics,
        Artifact::Mechanics,
    ];

    /// 命令行使用的键名
    pub fn key(self) -> &'static str {
        match self {
            Artifact::BulkCards => "bulk-cards",
            Artifact::TrimmedCards => "trimmed-cards",
            Artifact::DedupedCards => "deduped-cards",
            Artifact::KeywordCatalog => "keyword-catalog",
            Artifact::CompRulesText => "comp-rules",
            Artifact::WikiPage => "wiki-page",
            Artifact::KeywordAbilityRules => "keyword-abilities",
            Artifact::KeywordActionRules => "keyword-actions",
            Artifact::GlossaryTerms => "glossary",
            Artifact::AbilityWords => "ability-words",
            Artifact::AbilityWordsSorted => "ability-words-sorted",
            Artifact::FlavorWords => "flavor-words",
            Artifact::FlavorWordsSorted => "flavor-words-sorted",
            Artifact::FlavorWordsRejected => "flavor-words-rejected",
            Artifact::PatchTable => "patch",
            Artifact::MatchOverrides => "overrides",
            Artifact::WikiMechanics => "wiki-mechanics",
            Artifact::Mechanics => "mechanics",
        }
    }

    /// 按目录布局得到默认位置
    pub fn default_location(self, layout: &DataLayout) -> PathBuf {
        let raw = |name: &str| layout.raw_dir.join(name);
        let stat = |name: &str| layout.static_dir.join(name);
        match self {
            Artifact::BulkCards => raw("scryfall_full_cards.json"),
            Artifact::TrimmedCards => raw("scryfall_cards_trimmed_for_ml.json"),
            Artifact::DedupedCards => raw("scryfall_cards_deduplicated_for_ml.json"),
            Artifact::KeywordCatalog => raw("MTGJSON/Keywords.json"),
            Artifact::CompRulesText => raw("MagicCompRules.txt"),
            Artifact::WikiPage => raw("wiki_dump.html"),
            Artifact::KeywordAbilityRules => stat("keyword_ability_rules_structured_clean.json"),
            Artifact::KeywordActionRules => stat("keyword_action_rules_structured_clean.json"),
            Artifact::GlossaryTerms => stat("glossary_terms_structured_clean.json"),
            Artifact::AbilityWords => stat("ability_words_card_level.json"),
            Artifact::AbilityWordsSorted => stat("ability_words_card_level_sorted.json"),
            Artifact::FlavorWords => stat("flavor_words_card_level.json"),
            Artifact::FlavorWordsSorted => stat("flavor_words_card_level_sorted.json"),
            Artifact::FlavorWordsRejected => stat("flavor_words_rejected.json"),
            Artifact::PatchTable => stat("scryfall_subset_patch.json"),
            Artifact::MatchOverrides => stat("mechanic_overrides.json"),
            Artifact::WikiMechanics => stat("mechanics_full_scraped.json"),
            Artifact::Mechanics => stat("ml_ready_mechanics.json"),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Artifact {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Artifact::ALL
            .into_iter()
            .find(|a| a.key() == s.trim())
            .ok_or_else(|| MechError::InvalidInput(format!("unknown artifact key: {}", s)))
    }
}

/// 重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    Never,     // 不重试
    Times(u8), // 固定次数重试（不含第一次）
}

impl RetryPolicy {
    pub fn max_retries(self) -> usize {
        match self {
            RetryPolicy::Never => 0,
            RetryPolicy::Times(n) => n as usize,
        }
    }
}

/// 网络相关选项（仅远程流程使用）
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    /// Scryfall 批量数据索引
    pub bulk_data_url: String,
    /// Scryfall 检索接口
    pub search_url: String,
    /// 关键字列表页面
    pub wiki_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            bulk_data_url: "https://api.scryfall.com/bulk-data".to_string(),
            search_url: "https://api.scryfall.com/cards/search".to_string(),
            wiki_url: "https://en.wikipedia.org/wiki/List_of_Magic:_The_Gathering_keywords".to_string(),
            user_agent: format!("mtgmech/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::Times(2),
        }
    }
}

/// 完整管线配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub layout: DataLayout,
    /// 单个产物的路径覆盖
    pub overrides: FxHashMap<Artifact, PathBuf>,
    pub remote: RemoteOptions,
    /// 额外视为机制词的手工补充（风味词过滤）
    pub extra_mechanic_words: Vec<String>,
    /// 每条机制保留的卡牌样本数
    pub sample_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layout: DataLayout::default(),
            overrides: FxHashMap::default(),
            remote: RemoteOptions::default(),
            extra_mechanic_words: vec!["visit".to_string()],
            sample_size: 10,
        }
    }
}

impl PipelineConfig {
    /// 链式构建
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// 产物的实际路径：优先覆盖值，否则按布局推导
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.overrides
            .get(&artifact)
            .cloned()
            .unwrap_or_else(|| artifact.default_location(&self.layout))
    }
}

/// 配置构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.layout.raw_dir = path.into();
        self
    }

    pub fn static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.layout.static_dir = path.into();
        self
    }

    /// 覆盖单个产物路径（不随目录布局变化）
    pub fn artifact_path(mut self, artifact: Artifact, path: impl AsRef<Path>) -> Self {
        self.config.overrides.insert(artifact, path.as_ref().to_path_buf());
        self
    }

    pub fn remote_options(mut self, remote: RemoteOptions) -> Self {
        self.config.remote = remote;
        self
    }

    pub fn extra_mechanic_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_mechanic_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.config.sample_size = sample_size;
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

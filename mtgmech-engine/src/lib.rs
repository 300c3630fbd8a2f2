// 核心公共结构体+枚举
pub mod core;
// 内核错误定义
pub mod error;
// 文本规范化+日志预览工具
pub mod utils;
// 规则文本语料构建
pub mod indexer;
// 整词匹配+覆盖配置+机制匹配器
pub mod matcher;
// 能力词/风味词行首标题提取
pub mod extractor;
// 候选机制构建+去重
pub mod builder;
// 规则源解析 (综合规则纯文本)
pub mod source;
// 卡牌集合裁剪+去重
pub mod cards;

// 顶层导出常用类型
pub use builder::{DedupOutcome, Deduplicator, MechanicBuilder, MechanicSources};
pub use cards::{CardSet, CardSetOutcome};
pub use core::{
    Card, CardFace, Definitions, GlossaryTerm, Mechanic, MechanicType, RuleEntry, Subsection,
    WordKind, WordOccurrence,
};
pub use error::{CoreError, CoreResult};
pub use extractor::{
    AbilityWordExtractor, ExtractStats, FlavorWordExtractor, HeaderExtraction, RejectReason,
    RejectedHeader,
};
pub use indexer::OracleIndex;
pub use matcher::{CardRef, MatchOverrides, MatchResult, MatchSource, MechanicMatcher, PatchTable};
pub use source::{CompRulesParser, RulesSection};

//! 构建模块：候选机制生成与按名称去重
pub mod dedup;
pub mod mechanic_builder;

pub use dedup::{DedupOutcome, Deduplicator};
pub use mechanic_builder::{
    MechanicBuilder, MechanicSources, ABILITY_WORD_DESCRIPTION, DEFAULT_SAMPLE_SIZE,
    FLAVOR_WORD_DESCRIPTION,
};

//! 规则来源解析：综合规则纯文本
pub mod comp_rules;

pub use comp_rules::{CompRulesParser, RulesSection};

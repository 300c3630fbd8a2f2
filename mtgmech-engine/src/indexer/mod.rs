//! 索引模块：规则文本语料构建
pub mod oracle_index;

pub use oracle_index::{OracleIndex, OracleIndexEntry};

//! mtgmech-engine 内核错误定义
//! 封装内核层所有核心错误，与批处理层错误解耦，基于thiserror实现类型安全处理
use thiserror::Error;

use regex::Error as RegexError;

/// 内核核心错误枚举
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================== 规则文本相关错误 =====================
    /// 规则文本解析失败（综合规则文档结构不符合预期）
    #[error("Rule text parse failed: {0}")]
    RuleParseError(String),

    // ===================== 匹配相关错误 =====================
    /// 匹配词条正则编译失败
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    // ===================== 内核基础错误 =====================
    /// 无效输入参数（内核层输入校验失败）
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// 内核层全局Result类型别名
pub type CoreResult<T> = Result<T, CoreError>;

//! 整词匹配模式
//! regex 不支持环视，边界以 `(?:^|\W)` / `(?:\W|$)` 表达：
//! 词条两侧不得紧邻任何单词字符

use regex::{Regex, RegexBuilder};

use crate::error::CoreResult;
use crate::utils::normalize;

/// 编译后的整词匹配模式
#[derive(Debug, Clone)]
pub struct WholeWordPattern {
    term: String,
    regex: Regex,
}

impl WholeWordPattern {
    /// 编译词条（先归一化，保证与语料口径一致）
    pub fn compile(term: &str) -> CoreResult<Self> {
        let term = normalize(term);
        let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&term));
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { term, regex })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// 是否以整词形式出现在文本中
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        !self.term.is_empty() && self.regex.is_match(text)
    }
}

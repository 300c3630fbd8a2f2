//! 综合规则纯文本解析
//! 输入为规则文档的纯文本导出（逐行），输出关键字动作/能力规则条目与术语表词条

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::core::{Definitions, GlossaryTerm, RuleEntry, Subsection};
use crate::error::{CoreError, CoreResult};

/// 规则开始行：`702.9. Flying`
static RULE_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{3})\.(\d+)\.\s+[A-Z]").unwrap());
/// 规则标题：编号后的名称部分
static RULE_HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3}\.\d+)\.\s+([A-Z][a-zA-Z \-']+)").unwrap());
/// 子条款行：`702.9a text`
static SUBSECTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{3}\.\d+)([a-z])\s+(.*)$").unwrap());
/// 章节边界：任意三位数章节编号、术语表、致谢
static SECTION_BOUNDARY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(\d{3})\.|Glossary\b|Credits\b)").unwrap());
/// 术语表回指行：`702.106, "Hidden Agenda."`
static BACK_REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}\.\d{1,3},").unwrap());
/// 编号定义分隔：`1. ... 2. ...`
static NUMBERED_DEFINITION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\.\s+").unwrap());

/// 关键字规则所在章节
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesSection {
    /// 701 关键字动作
    KeywordActions,
    /// 702 关键字能力
    KeywordAbilities,
}

impl RulesSection {
    pub fn number(self) -> &'static str {
        match self {
            RulesSection::KeywordActions => "701",
            RulesSection::KeywordAbilities => "702",
        }
    }

    /// 章节引言条目编号（非机制，解析后移除）
    fn intro_code(self) -> String {
        format!("{}.1", self.number())
    }
}

impl fmt::Display for RulesSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}", self.number())
    }
}

/// 综合规则解析器
pub struct CompRulesParser;

impl CompRulesParser {
    /// 解析指定章节的全部规则条目，按首次出现顺序输出
    pub fn keyword_entries(text: &str, section: RulesSection) -> CoreResult<Vec<RuleEntry>> {
        let blocks = Self::collect_rule_blocks(text, section);
        if blocks.is_empty() {
            return Err(CoreError::RuleParseError(format!("no rules found for {}", section)));
        }

        let mut entries: Vec<RuleEntry> = Vec::new();
        let mut positions: FxHashMap<String, usize> = FxHashMap::default();
        let intro = section.intro_code();
        let mut unnamed = 0usize;

        for (code, lines) in blocks {
            if code == intro {
                continue;
            }
            let Some(entry) = Self::parse_rule_block(&code, &lines) else {
                unnamed += 1;
                continue;
            };
            match positions.get(&code) {
                Some(&slot) => entries[slot] = entry,
                None => {
                    positions.insert(code, entries.len());
                    entries.push(entry);
                }
            }
        }

        log::debug!(
            "Parsed {} rule entries from {} | {} blocks without a name",
            entries.len(),
            section,
            unnamed
        );
        Ok(entries)
    }

    /// 按规则编号切分章节文本，返回 (编号, 行列表)
    fn collect_rule_blocks(text: &str, section: RulesSection) -> Vec<(String, Vec<String>)> {
        let mut blocks: Vec<(String, Vec<String>)> = Vec::new();
        let mut inside = false;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = RULE_START_REGEX.captures(line) {
                if &caps[1] == section.number() {
                    inside = true;
                    blocks.push((format!("{}.{}", &caps[1], &caps[2]), vec![line.to_string()]));
                    continue;
                }
            }

            if let Some(caps) = SECTION_BOUNDARY_REGEX.captures(line) {
                let same_section = caps.get(1).is_some_and(|m| m.as_str() == section.number());
                if !same_section {
                    inside = false;
                    continue;
                }
            }

            if inside {
                if let Some((_, lines)) = blocks.last_mut() {
                    lines.push(line.to_string());
                }
            }
        }

        blocks
    }

    /// 解析单条规则：标题行给出名称，子条款行开启新子条款，其余行续接上一子条款
    fn parse_rule_block(code: &str, lines: &[String]) -> Option<RuleEntry> {
        let mut entry = RuleEntry {
            code: Some(code.to_string()),
            ..RuleEntry::default()
        };

        for line in lines {
            if let Some(caps) = RULE_HEADER_REGEX.captures(line) {
                if &caps[1] == code {
                    entry.name = Some(caps[2].trim().to_string());
                    continue;
                }
            }

            if let Some(caps) = SUBSECTION_REGEX.captures(line) {
                if &caps[1] == code {
                    entry.subsections.push(Subsection {
                        id: format!("{}{}", &caps[1], &caps[2]),
                        text: caps[3].trim().to_string(),
                    });
                    continue;
                }
            }

            if BACK_REFERENCE_REGEX.is_match(line) {
                continue;
            }
            if let Some(last) = entry.subsections.last_mut() {
                last.text.push(' ');
                last.text.push_str(line);
            }
        }

        entry.name.is_some().then_some(entry)
    }

    /// 解析术语表：最后一个 `Glossary` 行之后到随后的 `Credits` 行之前，
    /// 以空行分块，首行为词条，其余为定义
    pub fn glossary_terms(text: &str) -> CoreResult<Vec<GlossaryTerm>> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let start = lines
            .iter()
            .rposition(|line| *line == "Glossary")
            .ok_or_else(|| CoreError::RuleParseError("glossary heading not found".to_string()))?;

        let mut terms = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        let mut skipped = 0usize;

        for line in lines[start + 1..].iter().copied() {
            if line.starts_with("Credits") {
                break;
            }
            if line.is_empty() {
                Self::flush_glossary_block(&mut block, &mut terms, &mut skipped);
            } else {
                block.push(line);
            }
        }
        Self::flush_glossary_block(&mut block, &mut terms, &mut skipped);

        log::debug!("Parsed {} glossary terms | {} blocks without a definition", terms.len(), skipped);
        Ok(terms)
    }

    fn flush_glossary_block(block: &mut Vec<&str>, terms: &mut Vec<GlossaryTerm>, skipped: &mut usize) {
        if block.is_empty() {
            return;
        }
        if block.len() < 2 {
            *skipped += 1;
            block.clear();
            return;
        }

        let term = block[0].to_string();
        let definition = block[1..].join(" ");
        terms.push(GlossaryTerm {
            term,
            definitions: Some(Self::split_numbered(&definition)),
            ..GlossaryTerm::default()
        });
        block.clear();
    }

    /// `1. a 2. b` 形式拆分为多条定义，否则保持单条
    pub fn split_numbered(definition: &str) -> Definitions {
        let parts: Vec<&str> = NUMBERED_DEFINITION_REGEX.split(definition).collect();
        if parts.len() <= 1 {
            return Definitions::One(definition.trim().to_string());
        }
        let numbered: Vec<String> = parts[1..]
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        match numbered.len() {
            0 => Definitions::One(definition.trim().to_string()),
            1 => Definitions::One(numbered.into_iter().next().unwrap_or_default()),
            _ => Definitions::Many(numbered),
        }
    }
}

//! 关键字列表页面表格提取器
//! 流式分词，逐表逐行收集 `td` 单元格文本

use std::cell::RefCell;

use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use serde::Serialize;
use tendril::StrTendril;

/// 名称单元格允许的最大字符数
const MAX_NAME_CHARS: usize = 40;

/// 抓取到的一行机制记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapedMechanic {
    pub name: String,
    pub rules_text: String,
    /// 所在表格序号（从 1 开始，按文档顺序）
    pub table_index: usize,
}

#[derive(Debug, Default)]
struct OpenTable {
    index: usize,
    rows_seen: usize,
}

#[derive(Debug, Default)]
struct TableState {
    tables_seen: usize,
    open_tables: Vec<OpenTable>,
    /// 当前行是否参与收集（每张表首行视为表头跳过）
    collecting_row: bool,
    cells: Vec<String>,
    cell: Option<String>,
    rows: Vec<ScrapedMechanic>,
}

impl TableState {
    fn close_cell(&mut self) {
        if let Some(text) = self.cell.take() {
            self.cells.push(collapse_whitespace(&text));
        }
    }

    fn close_row(&mut self) {
        self.close_cell();
        let cells = std::mem::take(&mut self.cells);
        if !std::mem::take(&mut self.collecting_row) || cells.len() < 2 {
            return;
        }
        let Some(table) = self.open_tables.last() else {
            return;
        };

        let name = &cells[0];
        if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
            return;
        }
        self.rows.push(ScrapedMechanic {
            name: name.clone(),
            rules_text: cells[1].clone(),
            table_index: table.index,
        });
    }

    fn start_tag(&mut self, name: &str) {
        match name {
            "table" => {
                self.close_row();
                self.tables_seen += 1;
                self.open_tables.push(OpenTable {
                    index: self.tables_seen,
                    rows_seen: 0,
                });
            }
            "tr" => {
                self.close_row();
                if let Some(table) = self.open_tables.last_mut() {
                    self.collecting_row = table.rows_seen > 0;
                    table.rows_seen += 1;
                }
            }
            "td" if self.collecting_row => {
                self.close_cell();
                self.cell = Some(String::new());
            }
            "th" => self.close_cell(),
            "br" => self.push_text(" "),
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "td" => self.close_cell(),
            "tr" => self.close_row(),
            "table" => {
                self.close_row();
                self.open_tables.pop();
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_str(text);
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Default)]
pub struct WikiTableExtractor {
    state: RefCell<TableState>,
}

impl TokenSink for WikiTableExtractor {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::TagToken(Tag {
                kind: TagKind::StartTag,
                name,
                ..
            }) => state.start_tag(name.as_ref()),
            Token::TagToken(Tag {
                kind: TagKind::EndTag,
                name,
                ..
            }) => state.end_tag(name.as_ref()),
            Token::CharacterTokens(text) => state.push_text(&text),
            Token::EOFToken => state.close_row(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

impl WikiTableExtractor {
    /// 从 HTML 文本提取所有表格中的机制行
    pub fn extract(html: &str) -> Vec<ScrapedMechanic> {
        let tokenizer = Tokenizer::new(Self::default(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        let state = tokenizer.sink.state.into_inner();
        tracing::debug!(
            "Scanned {} tables, collected {} mechanic rows",
            state.tables_seen,
            state.rows.len()
        );
        state.rows
    }
}

//! 网页表格抓取
pub mod wiki_table;

pub use wiki_table::{ScrapedMechanic, WikiTableExtractor};

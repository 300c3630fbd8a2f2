//! 远程数据拉取（Scryfall 批量数据、检索补丁、关键字页面）
#[cfg(feature = "remote-loader")]
pub mod fetcher;
pub mod search;

#[cfg(feature = "remote-loader")]
pub use fetcher::RemoteFetcher;
pub use search::{BulkDataIndex, HarvestQuery, SearchPage, DEFAULT_HARVEST_QUERIES};

//! Scryfall 接口数据结构与检索请求构造

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{MechError, MechResult};

/// 补丁采集检索项：标签（小写后作为补丁表键）+ Scryfall 检索语句
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestQuery {
    pub label: &'static str,
    pub query: &'static str,
}

/// 规则文本匹配不到卡牌的机制，改由 Scryfall 检索补齐
pub const DEFAULT_HARVEST_QUERIES: [HarvestQuery; 7] = [
    HarvestQuery { label: "aftermath", query: "o:\"aftermath\"" },
    HarvestQuery { label: "convert", query: "o:\"convert\"" },
    HarvestQuery { label: "living metal", query: "o:\"living metal\"" },
    HarvestQuery { label: "More Than Meets the Eye", query: "keyword:\"more than meets the eye\"" },
    HarvestQuery { label: "endure", query: "o:\"endure\"" },
    HarvestQuery { label: "daybound", query: "keyword:daybound" },
    HarvestQuery { label: "nightbound", query: "keyword:nightbound" },
];

impl HarvestQuery {
    /// 补丁表键
    pub fn key(&self) -> String {
        self.label.to_lowercase()
    }

    /// 首页请求地址（检索语句按查询参数编码）
    pub fn first_page_url(&self, search_url: &str) -> MechResult<Url> {
        Ok(Url::parse_with_params(search_url, &[("q", self.query)])?)
    }
}

/// 检索结果分页
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// 出错时（如无结果）不存在
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// 批量数据索引
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDataIndex {
    #[serde(default)]
    pub data: Vec<BulkDataEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDataEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub download_uri: String,
}

impl BulkDataIndex {
    /// 指定类型的下载地址
    pub fn download_uri(&self, kind: &str) -> MechResult<&str> {
        self.data
            .iter()
            .find(|entry| entry.kind == kind && !entry.download_uri.is_empty())
            .map(|entry| entry.download_uri.as_str())
            .ok_or_else(|| MechError::NetworkError(format!("bulk data index has no '{}' entry", kind)))
    }
}

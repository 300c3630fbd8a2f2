//! Remote fetcher module
//! 远程拉取工具
//! 1. 纯异步设计（调用方自行选择运行时）
//! 2. 可配置重试策略（Never/Times(n)）
//! 3. 检索结果自动翻页

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::search::{BulkDataIndex, HarvestQuery, SearchPage};
use crate::config::RemoteOptions;
use crate::error::{MechError, MechResult};

/// 批量数据类型：每张卡的每个印刷版本
const DEFAULT_CARDS: &str = "default_cards";
/// 翻页请求之间的间隔（Scryfall 要求限速）
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// 远程拉取器
pub struct RemoteFetcher {
    client: Client,
    options: RemoteOptions,
}

impl RemoteFetcher {
    pub fn new(options: RemoteOptions) -> MechResult<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| MechError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, options })
    }

    /// 通用异步重试逻辑，保留最后一次错误
    async fn simple_retry<F, Fut, T>(&self, mut func: F) -> MechResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = MechResult<T>>,
    {
        let max_retries = self.options.retry.max_retries();
        let mut last_err: Option<MechError> = None;

        for attempt in 0..=max_retries {
            match func().await {
                Ok(res) => return Ok(res),
                Err(e) => {
                    if attempt < max_retries {
                        warn!(
                            "Request failed: {}, retrying (attempt {}/{})",
                            e,
                            attempt + 1,
                            max_retries
                        );
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| MechError::NetworkError("All retry attempts exhausted".to_string())))
    }

    async fn get_bytes_once(&self, url: &str) -> MechResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| MechError::NetworkError(format!("Failed to request {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(MechError::NetworkError(format!(
                "URL {} returned status code {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MechError::NetworkError(format!("Failed to read response bytes: {}", e)))?;
        Ok(bytes.to_vec())
    }

    /// 检索分页：4xx 响应体同样是合法的错误对象，只有服务端错误才重试
    async fn get_search_page_once(&self, url: &str) -> MechResult<SearchPage> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MechError::NetworkError(format!("Failed to request {}: {}", url, e)))?;

        if response.status().is_server_error() {
            return Err(MechError::NetworkError(format!(
                "URL {} returned status code {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MechError::NetworkError(format!("Failed to read response bytes: {}", e)))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET 请求（带重试），返回原始字节
    pub async fn get_bytes(&self, url: &str) -> MechResult<Vec<u8>> {
        self.simple_retry(|| self.get_bytes_once(url)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> MechResult<T> {
        let bytes = self.get_bytes(url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get_text(&self, url: &str) -> MechResult<String> {
        let bytes = self.get_bytes(url).await?;
        String::from_utf8(bytes).map_err(|e| MechError::NetworkError(format!("Response from {} is not UTF-8: {}", url, e)))
    }

    /// 下载全部印刷版本的批量卡牌数据（原样返回 JSON 字节）
    pub async fn fetch_bulk_cards(&self) -> MechResult<Vec<u8>> {
        let index: BulkDataIndex = self.get_json(&self.options.bulk_data_url).await?;
        let download_uri = index.download_uri(DEFAULT_CARDS)?.to_string();
        info!("Downloading bulk card data from {}", download_uri);

        let bytes = self.get_bytes(&download_uri).await?;
        debug!("Bulk card data downloaded ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// 逐项检索并翻页，结果按小写标签聚合为补丁表
    pub async fn harvest(&self, queries: &[HarvestQuery]) -> MechResult<BTreeMap<String, Vec<Value>>> {
        let mut results = BTreeMap::new();

        for query in queries {
            let mut cards: Vec<Value> = Vec::new();
            let mut next = Some(query.first_page_url(&self.options.search_url)?.to_string());
            debug!("Querying: {}", query.query);

            while let Some(url) = next.take() {
                let page = self.simple_retry(|| self.get_search_page_once(&url)).await?;
                let Some(data) = page.data else {
                    warn!(
                        "Search for '{}' failed: {}",
                        query.label,
                        page.details.as_deref().unwrap_or("no data returned")
                    );
                    break;
                };
                cards.extend(data);
                next = page.next_page;
                if next.is_some() {
                    tokio::time::sleep(PAGE_DELAY).await;
                }
            }

            info!("Found {} cards for '{}'", cards.len(), query.label);
            results.insert(query.key(), cards);
        }

        Ok(results)
    }
}

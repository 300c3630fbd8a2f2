//! mtgmech - MTG 机制数据集构建管线

// 导出全局错误类型
pub use self::error::{MechError, MechResult};

// 导出配置模块核心结构体与构建器
pub use self::config::{
    Artifact, DataLayout, PipelineConfig, PipelineConfigBuilder, RemoteOptions, RetryPolicy,
};

// 导出输入加载与产物写出
pub use self::source::{ArtifactWriter, KeywordCatalog, SourceLoader};

// 导出流程执行器
pub use self::pipeline::{Pass, PassReport, Pipeline};

// 导出网页表格提取
pub use self::scrape::{ScrapedMechanic, WikiTableExtractor};

// 内核类型
pub use mtgmech_engine as engine;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod pipeline;
pub mod remote;
pub mod scrape;
pub mod source;

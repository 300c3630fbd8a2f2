//! 管线配置
pub mod pipeline;

pub use pipeline::{
    Artifact, DataLayout, PipelineConfig, PipelineConfigBuilder, RemoteOptions, RetryPolicy,
};

//! 全局错误类型定义
use std::io::Error as IoError;
use std::path::PathBuf;

use mtgmech_engine::CoreError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum MechError {
    // 输入相关错误
    #[error("Missing or unreadable input {}: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("Failed to parse JSON input {}: {source}", path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: SerdeJsonError,
    },

    // 内核错误
    #[error(transparent)]
    Core(#[from] CoreError),

    // 网络相关错误
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("URL parse failed: {0}")]
    UrlError(#[from] UrlParseError),

    // 序列化/反序列化错误
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO operation failed: {0}")]
    IoError(#[from] IoError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type MechResult<T> = Result<T, MechError>;

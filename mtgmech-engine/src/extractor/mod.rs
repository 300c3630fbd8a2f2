//! 提取模块：能力词/风味词行首标题提取与统计
pub mod header;
pub mod stats;

pub use header::{
    AbilityWordExtractor, FlavorWordExtractor, HeaderCandidate, HeaderExtraction, HeaderScanner,
    RejectReason, RejectedHeader,
};
pub use stats::ExtractStats;

//! 输入加载与产物写出
pub mod loader;
pub mod writer;

pub use loader::{KeywordCatalog, SourceLoader};
pub use writer::ArtifactWriter;

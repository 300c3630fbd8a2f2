pub mod normalize;
pub mod preview;

pub use normalize::{normalize, title_case};
pub use preview::{preview_compact, preview_names};

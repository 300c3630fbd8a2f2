//! 匹配模块：整词模式、覆盖配置与机制匹配器
pub mod mechanic_matcher;
pub mod overrides;
pub mod term_pattern;

pub use mechanic_matcher::{MatchResult, MatchSource, MechanicMatcher};
pub use overrides::{CardRef, MatchOverrides, PatchTable};
pub use term_pattern::WholeWordPattern;

//! 卡牌集合整理
pub mod dedupe;

pub use dedupe::{CardSet, CardSetOutcome};

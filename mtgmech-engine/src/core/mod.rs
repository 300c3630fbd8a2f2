// 卡牌模型
pub mod card;
// 机制输出模型
pub mod mechanic;
// 规则条目/术语表/出现记录模型
pub mod rule_entry;

pub use card::{Card, CardFace};
pub use mechanic::{Mechanic, MechanicType};
pub use rule_entry::{Definitions, GlossaryTerm, RuleEntry, Subsection, WordKind, WordOccurrence};

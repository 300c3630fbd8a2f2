//! 按名称去重：同名候选只保留一条

use rustc_hash::FxHashMap;

use crate::core::Mechanic;

/// 去重结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupOutcome {
    /// 去重后的记录，顺序为各名称首次出现的顺序
    pub mechanics: Vec<Mechanic>,
    /// 后来者替换已保留记录的次数
    pub replaced: usize,
    /// 被丢弃的后来者数量
    pub discarded: usize,
}

/// 去重器
pub struct Deduplicator;

impl Deduplicator {
    /// 先到先得；后来者仅在类别优先级严格更高，或优先级相同且定义严格更长时替换。
    /// 不合并字段，替换时整条记录换掉。
    pub fn dedupe(candidates: Vec<Mechanic>) -> DedupOutcome {
        let mut outcome = DedupOutcome::default();
        let mut positions: FxHashMap<String, usize> = FxHashMap::default();

        for candidate in candidates {
            let Some(&slot) = positions.get(&candidate.name) else {
                positions.insert(candidate.name.clone(), outcome.mechanics.len());
                outcome.mechanics.push(candidate);
                continue;
            };

            let kept = &outcome.mechanics[slot];
            if Self::should_replace(kept, &candidate) {
                log::trace!("Replacing {} with {}", kept, candidate);
                outcome.mechanics[slot] = candidate;
                outcome.replaced += 1;
            } else {
                outcome.discarded += 1;
            }
        }

        log::debug!(
            "Dedup completed | kept {} | replaced {} | discarded {}",
            outcome.mechanics.len(),
            outcome.replaced,
            outcome.discarded
        );
        outcome
    }

    fn should_replace(kept: &Mechanic, candidate: &Mechanic) -> bool {
        if candidate.mechanic_type.outranks(kept.mechanic_type) {
            return true;
        }
        candidate.mechanic_type == kept.mechanic_type && candidate.definition_len() > kept.definition_len()
    }
}

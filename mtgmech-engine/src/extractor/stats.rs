//! 负责标题提取统计数据的定义、更新与格式化输出

use std::collections::BTreeMap;

use super::header::RejectReason;

/// 标题提取统计信息
/// 记录提取过程中的各类指标：
/// 1. 扫描的卡牌/卡面/行数
/// 2. 命中标题模式的候选数
/// 3. 接受数与按原因分组的拒绝数
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    // ========== 扫描统计 ==========
    /// 扫描的卡牌数
    pub cards_scanned: u32,
    /// 有文本的卡面数
    pub faces_scanned: u32,
    /// 扫描的文本行数
    pub lines_scanned: u32,
    /// 跳过的迷你游戏卡
    pub skipped_minigame: u32,

    // ========== 候选统计 ==========
    /// 命中标题模式的候选数
    pub headers_matched: u32,
    /// 接受数
    pub accepted: u32,
    /// 不在能力词表中的候选数
    pub not_in_vocabulary: u32,
    /// 各拒绝原因计数
    pub rejected: BTreeMap<RejectReason, u32>,
}

impl ExtractStats {
    pub fn record_rejection(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_default() += 1;
    }

    pub fn total_rejected(&self) -> u32 {
        self.rejected.values().sum()
    }

    /// 格式化输出统计信息（结构化日志）
    pub fn print_stats(&self, label: &str) {
        log::debug!(
            "Header extraction ({}) completed | Cards: {} | Faces: {} | Lines: {} | Minigame skipped: {}",
            label,
            self.cards_scanned,
            self.faces_scanned,
            self.lines_scanned,
            self.skipped_minigame
        );
        log::debug!(
            "Candidate stats: matched {} | accepted {} | not in vocabulary {} | rejected {}",
            self.headers_matched,
            self.accepted,
            self.not_in_vocabulary,
            self.total_rejected()
        );
        for (reason, count) in &self.rejected {
            log::debug!("  rejected [{}]: {}", reason, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejection() {
        let mut stats = ExtractStats::default();
        stats.record_rejection(RejectReason::TooManyWords);
        stats.record_rejection(RejectReason::TooManyWords);
        stats.record_rejection(RejectReason::MechanicWord);
        assert_eq!(stats.total_rejected(), 3);
        assert_eq!(stats.rejected.get(&RejectReason::TooManyWords), Some(&2));
        let order: Vec<RejectReason> = stats.rejected.keys().copied().collect();
        assert_eq!(order, vec![RejectReason::MechanicWord, RejectReason::TooManyWords]);
    }
}

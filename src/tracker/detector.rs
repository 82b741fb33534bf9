// src/tracker/detector.rs
use crate::types::{Block, HistorySnapshot, to_display};
use crate::utils::error::{NotifierError, Result};
use std::collections::BTreeMap;

/// Blocks of a wallet's history split by outcome
///
/// `won`, `lost` and `pending` are disjoint and together hold every block
/// that survived the exclusion filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Resolved blocks won by the wallet
    pub won: BTreeMap<u64, Block>,
    /// Resolved blocks won by someone else
    pub lost: BTreeMap<u64, Block>,
    /// Unresolved blocks and blocks above the current height
    pub pending: BTreeMap<u64, Block>,
    /// Wallet bids summed over `won` and `lost`, in micro-units
    pub committed_micro: u64,
}

impl ClassificationResult {
    /// Committed funds in display units
    pub fn committed(&self) -> f64 {
        to_display(self.committed_micro)
    }

    /// Number of blocks in scope after filtering
    pub fn total(&self) -> usize {
        self.won.len() + self.lost.len() + self.pending.len()
    }

    /// Number of blocks with a resolved winner
    pub fn resolved(&self) -> usize {
        self.won.len() + self.lost.len()
    }

    /// Highest won height, `None` if nothing was won
    pub fn newest_win(&self) -> Option<u64> {
        self.won.keys().next_back().copied()
    }
}

/// Partitions `history` into won, lost and pending for `wallet`
///
/// Blocks below `starting_height` or without the wallet as a participant
/// are dropped. Blocks above `current_height` are kept but always pending.
///
/// # Errors
/// `NoWinsFound` when the wallet has not won any in-scope block, and
/// `MetricsUnavailable` if the committed total overflows.
pub fn classify(
    history: &HistorySnapshot,
    wallet: &str,
    starting_height: u64,
    current_height: u64,
) -> Result<ClassificationResult> {
    let mut result = ClassificationResult::default();

    let in_scope = history
        .iter()
        .filter(|(height, block)| **height >= starting_height && block.has_participant(wallet));

    for (&height, block) in in_scope {
        let resolved = block.winner.as_deref().filter(|_| height <= current_height);

        match resolved {
            Some(winner) => {
                let bid = block.bid_of(wallet).unwrap_or_default();
                result.committed_micro =
                    result.committed_micro.checked_add(bid).ok_or_else(|| {
                        NotifierError::MetricsUnavailable(format!(
                            "committed funds overflow at block {}",
                            height
                        ))
                    })?;
                if winner == wallet {
                    result.won.insert(height, block.clone());
                } else {
                    result.lost.insert(height, block.clone());
                }
            }
            None => {
                result.pending.insert(height, block.clone());
            }
        }
    }

    if result.won.is_empty() {
        let err = NotifierError::NoWinsFound {
            examined: result.total(),
        };
        log::error!("{}", err);
        return Err(err);
    }

    log::debug!(
        "classified {} blocks: {} won, {} lost, {} pending",
        result.total(),
        result.won.len(),
        result.lost.len(),
        result.pending.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "SP1POOL";

    fn block(height: u64, bids: &[(&str, u64)], winner: Option<&str>) -> (u64, Block) {
        (
            height,
            Block {
                height,
                participants: bids.iter().map(|(w, b)| (w.to_string(), *b)).collect(),
                winner: winner.map(str::to_string),
            },
        )
    }

    fn sample_history() -> HistorySnapshot {
        [
            block(98, &[(WALLET, 1_000_000)], Some(WALLET)),
            block(99, &[("SP2", 3_000_000)], Some("SP2")),
            block(100, &[(WALLET, 10_000_000), ("SP2", 40_000_000)], Some(WALLET)),
            block(101, &[(WALLET, 5_000_000), ("SP2", 35_000_000)], Some("SP2")),
            block(102, &[(WALLET, 4_000_000)], None),
            block(103, &[(WALLET, 2_000_000)], Some(WALLET)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_partition_scenario() {
        let result = classify(&sample_history(), WALLET, 100, 102).unwrap();

        assert_eq!(result.won.keys().copied().collect::<Vec<_>>(), vec![100]);
        assert_eq!(result.lost.keys().copied().collect::<Vec<_>>(), vec![101]);
        // 103 is above the current height: pending even though resolved
        assert_eq!(result.pending.keys().copied().collect::<Vec<_>>(), vec![102, 103]);
        assert_eq!(result.committed_micro, 15_000_000);
        assert_eq!(result.committed(), 15.0);
        assert_eq!(result.newest_win(), Some(100));
    }

    #[test]
    fn test_buckets_are_disjoint_and_cover_filtered_history() {
        let history = sample_history();
        let result = classify(&history, WALLET, 100, 102).unwrap();

        let mut seen: Vec<u64> = result
            .won
            .keys()
            .chain(result.lost.keys())
            .chain(result.pending.keys())
            .copied()
            .collect();
        seen.sort_unstable();

        let expected: Vec<u64> = history
            .iter()
            .filter(|(h, b)| **h >= 100 && b.has_participant(WALLET))
            .map(|(h, _)| *h)
            .collect();

        assert_eq!(seen, expected);
        assert_eq!(result.total(), expected.len());
    }

    #[test]
    fn test_excludes_below_start_and_non_participation() {
        let result = classify(&sample_history(), WALLET, 100, 200).unwrap();

        assert!(!result.won.contains_key(&98));
        assert!(!result.lost.contains_key(&99));
        assert!(!result.pending.contains_key(&99));
        assert_eq!(result.newest_win(), Some(103));
    }

    #[test]
    fn test_committed_only_counts_resolved_blocks() {
        let result = classify(&sample_history(), WALLET, 0, 200).unwrap();

        let expected: u64 = result
            .won
            .values()
            .chain(result.lost.values())
            .filter_map(|b| b.bid_of(WALLET))
            .sum();
        assert_eq!(result.committed_micro, expected);
        assert_eq!(result.committed_micro, 18_000_000);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let history = sample_history();
        let first = classify(&history, WALLET, 100, 102).unwrap();
        let second = classify(&history, WALLET, 100, 102).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_wins_is_an_error() {
        let history: HistorySnapshot = [
            block(100, &[(WALLET, 1)], Some("SP2")),
            block(101, &[(WALLET, 1)], None),
        ]
        .into_iter()
        .collect();

        let err = classify(&history, WALLET, 0, 200).unwrap_err();
        assert!(matches!(err, NotifierError::NoWinsFound { examined: 2 }));
    }

    #[test]
    fn test_committed_overflow_is_an_error() {
        let history: HistorySnapshot = [
            block(100, &[(WALLET, u64::MAX)], Some(WALLET)),
            block(101, &[(WALLET, 1)], Some("SP2")),
        ]
        .into_iter()
        .collect();

        let err = classify(&history, WALLET, 0, 200).unwrap_err();
        assert!(matches!(err, NotifierError::MetricsUnavailable(_)));
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let err = classify(&HistorySnapshot::new(), WALLET, 0, 0).unwrap_err();
        assert!(matches!(err, NotifierError::NoWinsFound { examined: 0 }));
    }
}

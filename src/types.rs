// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of micro-units in one display unit (1 STX = 1,000,000 uSTX)
pub const MICRO_PER_UNIT: f64 = 1_000_000.0;

/// Height-keyed view of every block returned for a wallet
pub type HistorySnapshot = BTreeMap<u64, Block>;

/// Converts an amount in micro-units to display units
pub fn to_display(micro: u64) -> f64 {
    micro as f64 / MICRO_PER_UNIT
}

/// A single mining round as seen by the stats API
///
/// Blocks are immutable once parsed; classification only ever copies
/// them into new collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Block height
    pub height: u64,
    /// Committed bid per participant wallet, in micro-units
    pub participants: BTreeMap<String, u64>,
    /// Winning wallet, `None` while the block is unresolved
    pub winner: Option<String>,
}

impl Block {
    /// Bid committed by `wallet` in this block, if it participated
    pub fn bid_of(&self, wallet: &str) -> Option<u64> {
        self.participants.get(wallet).copied()
    }

    /// Sum of every participant's bid, in micro-units
    ///
    /// `None` if the sum does not fit in a `u64`.
    pub fn total_bid(&self) -> Option<u64> {
        self.participants
            .values()
            .try_fold(0u64, |acc, bid| acc.checked_add(*bid))
    }

    /// Whether `wallet` committed anything to this block
    pub fn has_participant(&self, wallet: &str) -> bool {
        self.participants.contains_key(wallet)
    }
}

/// Wire shape of a block in the stats API history response
///
/// ```json
/// { "miners": { "SP...": 1000000 }, "winner": "SP..." }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawBlock {
    /// Bids keyed by miner address
    #[serde(default)]
    pub miners: BTreeMap<String, u64>,

    /// Winner address, absent until the block is resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl RawBlock {
    /// Converts the wire record into a core [`Block`] at `height`
    pub fn into_block(self, height: u64) -> Block {
        Block {
            height,
            participants: self.miners,
            winner: self.winner,
        }
    }
}

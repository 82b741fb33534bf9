// src/tracker/metrics.rs
use crate::config::Economics;
use crate::tracker::detector::ClassificationResult;
use crate::types::to_display;
use crate::utils::error::{NotifierError, Result};

/// Economic summary of the newest win and of the pool so far
///
/// Amounts are in display units (STX), `mia_won` in whole MIA.
#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
    /// Height of the newest won block
    pub newest_height: u64,
    /// Wallet's bid in the newest won block
    pub winning_bid: f64,
    /// All participants' bids in the newest won block
    pub winning_block_total_bid: f64,
    /// Share of the newest block's bids placed by the wallet, in percent
    pub winning_probability: f64,
    /// MIA minted to the wallet across all won blocks
    pub mia_won: u64,
    /// STX committed per MIA won
    pub cost_basis: f64,
    /// MIA returned per 100 STX contributed, after fees
    pub winnings_per_100_stx: f64,
    /// Pool funds not yet committed
    pub pool_remaining: f64,
    /// Mean bid over resolved blocks
    pub average_bid: f64,
}

/// Derives [`Metrics`] from a classification
///
/// # Errors
/// `MetricsUnavailable` if any divisor is zero (or not finite), if an
/// integer total overflows, and when the classification holds no win at all.
pub fn compute(
    classification: &ClassificationResult,
    wallet: &str,
    pool_total: f64,
    economics: &Economics,
) -> Result<Metrics> {
    let (newest_height, winning_block) = classification
        .won
        .last_key_value()
        .ok_or_else(|| NotifierError::MetricsUnavailable("no won block".into()))?;

    let winning_bid = to_display(winning_block.bid_of(wallet).unwrap_or_default());
    let winning_block_total_bid = to_display(winning_block.total_bid().ok_or_else(|| {
        NotifierError::MetricsUnavailable(format!("total bid overflow at block {}", newest_height))
    })?);
    let winning_probability =
        100.0 * checked_div(winning_bid, winning_block_total_bid, "winning block total bid")?;

    let mia_won = economics
        .issuance_per_block
        .checked_mul(classification.won.len() as u64)
        .ok_or_else(|| {
            NotifierError::MetricsUnavailable(format!(
                "MIA won overflows at {} per block",
                economics.issuance_per_block
            ))
        })?;
    let committed = classification.committed();

    let cost_basis = checked_div(committed, mia_won as f64, "MIA won")?;
    let winnings_per_100_stx =
        checked_div(mia_won as f64, pool_total, "pool total")? * 100.0 * economics.fee_retention;
    let pool_remaining = pool_total - committed;
    let average_bid = checked_div(
        committed,
        classification.resolved() as f64,
        "resolved block count",
    )?;

    Ok(Metrics {
        newest_height: *newest_height,
        winning_bid,
        winning_block_total_bid,
        winning_probability,
        mia_won,
        cost_basis,
        winnings_per_100_stx,
        pool_remaining,
        average_bid,
    })
}

fn checked_div(numerator: f64, denominator: f64, what: &str) -> Result<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(NotifierError::MetricsUnavailable(format!(
            "division by zero: {} is {}",
            what, denominator
        )));
    }
    Ok(numerator / denominator)
}

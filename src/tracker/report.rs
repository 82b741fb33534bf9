// src/tracker/report.rs
use crate::config::Economics;
use crate::tracker::detector::ClassificationResult;
use crate::tracker::metrics::{self, Metrics};
use crate::utils::error::Result;

/// A rendered announcement for a newly won block
#[derive(Clone, Debug, PartialEq)]
pub struct WinReport {
    /// Height being announced
    pub height: u64,
    /// Figures the text was rendered from
    pub metrics: Metrics,
    /// Discord-flavoured markdown body
    pub text: String,
}

/// Pool-level inputs needed to render a report
#[derive(Clone, Debug)]
pub struct PoolContext<'a> {
    /// Pool name for the header
    pub pool_id: &'a str,
    /// Total funds under management, display units
    pub pool_total: f64,
    /// Issuance and fee constants
    pub economics: Economics,
}

/// Builds a report unless the newest win was already announced
///
/// Returns `Ok(None)` when the newest won height equals `last_win`. That
/// is the normal idle outcome and is stable across repeated calls.
pub fn check_wins(
    classification: &ClassificationResult,
    wallet: &str,
    last_win: Option<u64>,
    pool: &PoolContext<'_>,
) -> Result<Option<WinReport>> {
    let Some(newest) = classification.newest_win() else {
        return Ok(None);
    };

    if last_win == Some(newest) {
        log::info!("block {} already announced, nothing to report", newest);
        return Ok(None);
    }

    let metrics = metrics::compute(classification, wallet, pool.pool_total, &pool.economics)?;
    let text = format_report(classification, &metrics, newest, pool.pool_id);

    Ok(Some(WinReport {
        height: newest,
        metrics,
        text,
    }))
}

/// Renders the announcement text
pub fn format_report(
    classification: &ClassificationResult,
    metrics: &Metrics,
    newest_height: u64,
    pool_id: &str,
) -> String {
    let won = classification.won.len();
    let lost = classification.lost.len();
    let pending = classification.pending.len();

    [
        "\n\n\n--".to_string(),
        format!("{} wins another Block - `#{}`\n", pool_id, newest_height),
        ":trophy: Winnings:".to_string(),
        "```".to_string(),
        format!(
            "{} Total blocks won | {} Total MIA won | at {:.4} STX/MIA",
            won, metrics.mia_won, metrics.cost_basis
        ),
        format!(
            "100 STX contribution to the pool wins {:.2} after fees",
            metrics.winnings_per_100_stx
        ),
        "```".to_string(),
        ":ice_cube: Block Counts:".to_string(),
        "```".to_string(),
        format!(
            "{} Won + {} Lost + {} Pending = {} Total Mined",
            won,
            lost,
            pending,
            classification.total()
        ),
        "```".to_string(),
        ":hammer: Bidding:".to_string(),
        "```".to_string(),
        format!(
            "Total         : {:.1} STX spent | {:.1} STX remaining | {:.1} STX Average bid",
            classification.committed(),
            metrics.pool_remaining,
            metrics.average_bid
        ),
        format!(
            "In this block : {:.2} STX bid in {:.2} STX | Win Probability {:.2} %",
            metrics.winning_bid, metrics.winning_block_total_bid, metrics.winning_probability
        ),
        "```".to_string(),
    ]
    .join("\n")
}

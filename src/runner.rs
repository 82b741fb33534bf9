// src/runner.rs

//! One notifier invocation
//!
//! Reads settings and win state, fetches history, classifies it and, if a
//! new block was won, announces it. The win state is written last so a
//! failure anywhere before leaves it untouched.
use crate::config::{Settings, WinStateStore};
use crate::network::{MiningHistorySource, Notifier};
use crate::tracker::{self, PoolContext, WinReport};
use crate::utils::error::{NotifierError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

/// Payload of the external trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TriggerEvent {
    /// Post to the production webhook and persist the win state
    pub prod: bool,
}

impl TriggerEvent {
    /// Decodes `{"prod": bool}`, given raw or base64-encoded
    ///
    /// The base64 form is what a Pub/Sub push delivers in its `data` field.
    pub fn parse(payload: &str) -> Result<Self> {
        let payload = payload.trim();
        if payload.starts_with('{') {
            return serde_json::from_str(payload)
                .map_err(|e| NotifierError::TriggerError(e.to_string()));
        }

        let decoded = STANDARD.decode(payload)?;
        serde_json::from_slice(&decoded).map_err(|e| NotifierError::TriggerError(e.to_string()))
    }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Newest win had already been announced
    NothingNew {
        /// Newest won height in the history
        newest_win: u64,
    },
    /// A new win was announced
    Announced {
        /// Rendered report
        report: WinReport,
        /// Whether the production webhook and win state were updated
        prod: bool,
    },
}

/// Runs a single check with already validated settings
///
/// The test webhook receives every new report. The production webhook and
/// the win state are only touched when `event.prod` is set.
pub async fn run(
    event: TriggerEvent,
    settings: &Settings,
    state: &mut impl WinStateStore,
    source: &impl MiningHistorySource,
    notifier: &impl Notifier,
) -> Result<RunOutcome> {
    log::info!("Prod Mode: {}", event.prod);

    let last_win = state.last_win()?;

    let history = source.fetch_history(&settings.wallet_address).await?;
    let current_height = source.fetch_current_height().await?;
    log::info!(
        "fetched {} blocks, current block {}",
        history.len(),
        current_height
    );

    let classification = tracker::classify(
        &history,
        &settings.wallet_address,
        settings.mining_start_block,
        current_height,
    )?;

    let pool = PoolContext {
        pool_id: &settings.pool_id,
        pool_total: settings.pool_total,
        economics: settings.economics,
    };
    let report = tracker::check_wins(&classification, &settings.wallet_address, last_win, &pool)?;

    let Some(report) = report else {
        let newest_win = classification.newest_win().unwrap_or_default();
        log::info!("no new win, newest won block {}", newest_win);
        return Ok(RunOutcome::NothingNew { newest_win });
    };

    log::info!(
        "Newest won block: {}, Last recorded win: {:?}",
        report.height,
        last_win
    );
    log::info!("{}", report.text);

    // Both destinations must resolve before anything is sent
    let test_webhook = destination(settings.discord_webhook_test.as_deref(), "discord_webhook_test")?;
    let prod_webhook = if event.prod {
        Some(destination(settings.discord_webhook.as_deref(), "discord_webhook")?)
    } else {
        None
    };

    notifier.send(test_webhook, &report.text).await?;

    if let Some(prod_webhook) = prod_webhook {
        notifier.send(prod_webhook, &report.text).await?;
        state.record_win(report.height)?;
    } else {
        log::info!(
            "test mode, skipping recording, would've recorded blockheight {}",
            report.height
        );
    }

    Ok(RunOutcome::Announced {
        report,
        prod: event.prod,
    })
}

fn destination<'a>(url: Option<&'a str>, key: &str) -> Result<&'a str> {
    url.filter(|u| !u.trim().is_empty())
        .ok_or_else(|| NotifierError::ConfigError(format!("Missing webhook: {}", key)))
}
